//! Drag-to-radius controller.
//!
//! Turns horizontal pointer travel across the interaction surface into a
//! multiplicative change of the selection radius. Each move scales the radius
//! by `|1 ± Δx / (surface_width / 2)|`, so sensitivity does not depend on
//! screen resolution and long gestures compose without additive drift.
//!
//! Direction compares the pointer's offset from the overlay center against
//! the offset seen on the previous move, not against zero.

use crate::config::SelectorConfig;
use crate::error::{ConfigError, SelectorError};
use crate::geo::Point;

/// Per-gesture state; exists only between pointer-down and pointer-up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    pub start_point: Point,
    pub previous_point: Point,
    pub previous_x_offset_from_center: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragDirection {
    Grow,
    Shrink,
}

/// Outcome of one processed move event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragStep {
    pub direction: DragDirection,
    pub delta_ratio: f64,
    /// Raw multiplicative factor before clamping.
    pub factor: f64,
    pub previous_radius_m: f64,
    pub radius_m: f64,
    /// Radius hit `min`/`max` bounds on this step.
    pub clamped: bool,
}

impl DragStep {
    /// Shrink steps whose ratio would zero or invert the radius.
    pub fn degenerate(&self) -> Option<SelectorError> {
        (self.direction == DragDirection::Shrink && self.delta_ratio >= 1.0).then_some(
            SelectorError::DegenerateDrag {
                ratio: self.delta_ratio,
            },
        )
    }

    /// Ratio actually applied after clamping; scales the overlay in step.
    pub fn effective_factor(&self) -> f64 {
        if self.previous_radius_m > 0.0 {
            self.radius_m / self.previous_radius_m
        } else {
            self.factor
        }
    }
}

#[inline]
pub fn drag_direction(x_offset: f64, previous_x_offset: f64) -> DragDirection {
    if x_offset < previous_x_offset {
        DragDirection::Shrink
    } else {
        DragDirection::Grow
    }
}

/// Horizontal travel as a fraction of half the surface width.
#[inline]
pub fn delta_ratio(current_x: f64, previous_x: f64, surface_width_px: f64) -> f64 {
    ((current_x - previous_x) / (surface_width_px / 2.0)).abs()
}

#[inline]
pub fn scale_factor(direction: DragDirection, delta_ratio: f64) -> f64 {
    match direction {
        DragDirection::Shrink => (1.0 - delta_ratio).abs(),
        DragDirection::Grow => (1.0 + delta_ratio).abs(),
    }
}

#[derive(Clone, Debug)]
pub struct DragController {
    radius_m: f64,
    min_radius_m: f64,
    max_radius_m: f64,
    surface_width_px: f64,
    overlay_diameter_px: f64,
    session: Option<DragSession>,
}

impl DragController {
    pub fn new(config: &SelectorConfig) -> Self {
        Self {
            radius_m: config.initial_radius_m,
            min_radius_m: config.min_radius_m,
            max_radius_m: config.max_radius_m,
            surface_width_px: config.surface_width_px,
            overlay_diameter_px: config.initial_overlay_diameter_px,
            session: None,
        }
    }

    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }

    pub fn surface_width_px(&self) -> f64 {
        self.surface_width_px
    }

    pub fn overlay_diameter_px(&self) -> f64 {
        self.overlay_diameter_px
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn set_surface_width(&mut self, width_px: f64) -> Result<(), ConfigError> {
        if !(width_px.is_finite() && width_px > 0.0) {
            return Err(ConfigError::SurfaceWidth(width_px));
        }
        self.surface_width_px = width_px;
        Ok(())
    }

    /// Adopt the diameter measured against the live projection.
    pub fn sync_overlay_diameter(&mut self, diameter_px: f64) {
        if diameter_px.is_finite() && diameter_px > 0.0 {
            self.overlay_diameter_px = diameter_px;
        }
    }

    /// Start a gesture at `point`. Replaces any session left open.
    pub fn begin(&mut self, point: Point, overlay_center_x: f64) -> DragSession {
        let session = DragSession {
            start_point: point,
            previous_point: point,
            previous_x_offset_from_center: point.x - overlay_center_x,
        };
        self.session = Some(session);
        session
    }

    /// Apply one move. `None` while idle.
    pub fn update(&mut self, point: Point, overlay_center_x: f64) -> Option<DragStep> {
        let surface_width_px = self.surface_width_px;
        let session = self.session.as_mut()?;

        let x_offset = point.x - overlay_center_x;
        let ratio = delta_ratio(point.x, session.previous_point.x, surface_width_px);
        let direction = drag_direction(x_offset, session.previous_x_offset_from_center);
        let factor = scale_factor(direction, ratio);

        let previous_radius_m = self.radius_m;
        let scaled = previous_radius_m * factor;
        let radius_m = scaled.clamp(self.min_radius_m, self.max_radius_m);
        self.radius_m = radius_m;

        let step = DragStep {
            direction,
            delta_ratio: ratio,
            factor,
            previous_radius_m,
            radius_m,
            clamped: radius_m != scaled,
        };
        self.overlay_diameter_px *= step.effective_factor();

        session.previous_x_offset_from_center = x_offset;
        session.previous_point = point;
        Some(step)
    }

    /// Finish the gesture, handing back its final state.
    pub fn end(&mut self) -> Option<DragSession> {
        self.session.take()
    }
}
