use anyhow::Context;
use geofence_core::{RadiusSelector, SelectorConfig, SelectorEvent};
use glam::DVec2;

mod script;
mod sim;

use script::{parse_script, Step};
use sim::SimulatedMap;

// Replayed when no script path is given: locate, grow, shrink past the
// center, slide off the surface, release, then pan the map by hand.
const DEMO_SCRIPT: &str = "\
surface 375 600
auth when-in-use
fix 43.6532 -79.3832
down 187.5 300
move 217.5 300
move 247.5 310
move 232.5 310
move 400 310 off
move 210 305
up
pan 43.6600 -79.3900
";

fn run(steps: &[Step], config: SelectorConfig) -> anyhow::Result<(RadiusSelector, SimulatedMap)> {
    let viewport = DVec2::new(config.surface_width_px, config.surface_width_px);
    let mut selector = RadiusSelector::new(config).context("invalid selector config")?;
    let mut map = SimulatedMap::new(viewport);
    // A freshly shown map reports its initial region.
    map.dispatch(&mut selector, map.settled_event());

    for step in steps {
        log::debug!("[script] {:?}", step);
        let event = match step {
            Step::Surface { width, height } => {
                selector
                    .set_surface_width(*width)
                    .context("invalid surface width")?;
                map.resize(DVec2::new(*width, *height))
            }
            Step::Auth(status) => SelectorEvent::AuthorizationChanged(*status),
            Step::Fix(c) => SelectorEvent::LocationFix(*c),
            Step::LocationError(reason) => SelectorEvent::LocationError(reason.clone()),
            Step::Down { point, off_surface } => SelectorEvent::PointerDown {
                point: *point,
                on_surface: !off_surface && map.contains(*point),
            },
            Step::Move { point, off_surface } => SelectorEvent::PointerMove {
                point: *point,
                on_surface: !off_surface && map.contains(*point),
            },
            Step::Up => SelectorEvent::PointerUp,
            Step::Pan(c) => map.pan_to(*c),
        };
        map.dispatch(&mut selector, event);
    }
    Ok((selector, map))
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("geofence-native starting");

    let source = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read gesture script {path}"))?,
        None => DEMO_SCRIPT.to_string(),
    };
    let steps = parse_script(&source).context("failed to parse gesture script")?;
    let config = SelectorConfig::from_env().context("invalid GEOFENCE_* environment")?;

    let (selector, map) = run(&steps, config)?;

    match selector.selection() {
        Some(selection) => println!(
            "center ({:.6}, {:.6}) radius {:.1} m",
            selection.center.latitude, selection.center.longitude, selection.radius_m
        ),
        None => println!("no selection (location unavailable)"),
    }
    log::info!(
        "[location] continuous updates {}",
        if map.location_updates_active() {
            "still on"
        } else {
            "stopped"
        }
    );
    let view = map.projection();
    println!(
        "map {:.0}x{:.0} px at {:.3} m/px",
        view.viewport_size.x,
        view.viewport_size.y,
        view.meters_per_pixel(view.center_coordinate().latitude)
    );
    if let Some(overlay) = map.overlay() {
        println!(
            "overlay {:.1} px at ({:.1}, {:.1}); {} viewport requests",
            overlay.diameter_px,
            overlay.screen_center.x,
            overlay.screen_center.y,
            map.viewport_requests()
        );
    }
    Ok(())
}
