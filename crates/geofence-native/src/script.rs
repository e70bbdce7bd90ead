//! Line-oriented gesture scripts replayed by the native front-end.
//!
//! ```text
//! surface 300 300
//! auth when-in-use
//! fix 43.6532 -79.3832
//! down 150 150
//! move 180 150
//! move 170 150 off
//! up
//! pan 43.66 -79.39
//! ```

use anyhow::{bail, Context};
use geofence_core::{AuthorizationStatus, GeoCoordinate, Point};

#[derive(Clone, Debug, PartialEq)]
pub enum Step {
    Surface { width: f64, height: f64 },
    Auth(AuthorizationStatus),
    Fix(GeoCoordinate),
    LocationError(String),
    Down { point: Point, off_surface: bool },
    Move { point: Point, off_surface: bool },
    Up,
    Pan(GeoCoordinate),
}

fn number(token: Option<&str>, what: &str) -> anyhow::Result<f64> {
    let raw = token.with_context(|| format!("missing {what}"))?;
    let value: f64 = raw
        .parse()
        .with_context(|| format!("{what} {raw:?} is not a number"))?;
    if !value.is_finite() {
        bail!("{what} must be finite, got {raw}");
    }
    Ok(value)
}

fn auth_status(token: Option<&str>) -> anyhow::Result<AuthorizationStatus> {
    Ok(match token {
        Some("not-determined") => AuthorizationStatus::NotDetermined,
        Some("restricted") => AuthorizationStatus::Restricted,
        Some("denied") => AuthorizationStatus::Denied,
        Some("always") => AuthorizationStatus::AuthorizedAlways,
        Some("when-in-use") => AuthorizationStatus::AuthorizedWhenInUse,
        Some(other) => bail!("unknown authorization status {other:?}"),
        None => bail!("missing authorization status"),
    })
}

fn off_flag(token: Option<&str>) -> anyhow::Result<bool> {
    match token {
        None => Ok(false),
        Some("off") => Ok(true),
        Some(other) => bail!("expected `off`, got {other:?}"),
    }
}

fn parse_line(line: &str) -> anyhow::Result<Option<Step>> {
    let line = line.split('#').next().unwrap_or("").trim();
    if line.is_empty() {
        return Ok(None);
    }
    let mut tokens = line.split_whitespace();
    let verb = tokens.next().unwrap_or_default();
    let step = match verb {
        "surface" => Step::Surface {
            width: number(tokens.next(), "width")?,
            height: number(tokens.next(), "height")?,
        },
        "auth" => Step::Auth(auth_status(tokens.next())?),
        "fix" | "pan" => {
            let c = GeoCoordinate::new(
                number(tokens.next(), "latitude")?,
                number(tokens.next(), "longitude")?,
            );
            if verb == "fix" {
                Step::Fix(c)
            } else {
                Step::Pan(c)
            }
        }
        "locerr" => {
            let reason = tokens.by_ref().collect::<Vec<_>>().join(" ");
            Step::LocationError(if reason.is_empty() {
                "unknown".to_string()
            } else {
                reason
            })
        }
        "down" | "move" => {
            let point = Point::new(number(tokens.next(), "x")?, number(tokens.next(), "y")?);
            let off_surface = off_flag(tokens.next())?;
            if verb == "down" {
                Step::Down { point, off_surface }
            } else {
                Step::Move { point, off_surface }
            }
        }
        "up" => Step::Up,
        other => bail!("unknown command {other:?}"),
    };
    if let Some(extra) = tokens.next() {
        bail!("unexpected trailing token {extra:?}");
    }
    Ok(Some(step))
}

pub fn parse_script(source: &str) -> anyhow::Result<Vec<Step>> {
    let mut steps = Vec::new();
    for (i, line) in source.lines().enumerate() {
        let step =
            parse_line(line).with_context(|| format!("line {}: {:?}", i + 1, line.trim()))?;
        steps.extend(step);
    }
    Ok(steps)
}
