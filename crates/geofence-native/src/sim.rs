//! Stand-in for the map widget and location service.
//!
//! Applies the selector's commands the way a real map would: viewport
//! requests snap immediately and report back as settle notifications, but
//! only when the visible region actually changed.

use geofence_core::{
    Command, GeoCoordinate, OverlayGeometry, Point, ProjectionState, RadiusSelector,
    SelectorEvent, ViewportRequest,
};
use glam::DVec2;
use std::collections::VecDeque;

// Settle notifications followed per inbound event before giving up.
const MAX_SETTLE_ROUNDS: usize = 8;

// Zoom shown before the first region request (about 1 km across 300 px at the equator).
const INITIAL_UNITS_PER_PIXEL: f64 = 22.0;

pub struct SimulatedMap {
    projection: ProjectionState,
    overlay: Option<OverlayGeometry>,
    location_updates: bool,
    requests: usize,
}

fn same_view(a: &ProjectionState, b: &ProjectionState) -> bool {
    (a.center - b.center).length() <= 1e-6 * a.units_per_pixel.max(1e-12)
        && (a.units_per_pixel - b.units_per_pixel).abs() <= 1e-9 * a.units_per_pixel
        && a.viewport_size == b.viewport_size
}

impl SimulatedMap {
    pub fn new(viewport_size: DVec2) -> Self {
        Self {
            projection: ProjectionState::new(
                GeoCoordinate::default(),
                INITIAL_UNITS_PER_PIXEL,
                viewport_size,
            ),
            overlay: None,
            location_updates: true,
            requests: 0,
        }
    }

    pub fn projection(&self) -> &ProjectionState {
        &self.projection
    }

    pub fn overlay(&self) -> Option<OverlayGeometry> {
        self.overlay
    }

    pub fn viewport_requests(&self) -> usize {
        self.requests
    }

    pub fn location_updates_active(&self) -> bool {
        self.location_updates
    }

    /// Notification a widget sends once its visible region is in place.
    pub fn settled_event(&self) -> SelectorEvent {
        SelectorEvent::ViewportSettled {
            center: self.projection.center_coordinate(),
            projection: self.projection,
        }
    }

    pub fn resize(&mut self, viewport_size: DVec2) -> SelectorEvent {
        self.projection.viewport_size = viewport_size;
        self.settled_event()
    }

    /// User drags the map to `center` without changing zoom.
    pub fn pan_to(&mut self, center: GeoCoordinate) -> SelectorEvent {
        self.projection = ProjectionState {
            center: geofence_core::project(center),
            ..self.projection
        };
        self.settled_event()
    }

    pub fn contains(&self, p: Point) -> bool {
        self.projection.contains_screen_point(p)
    }

    fn apply_request(&mut self, request: &ViewportRequest) -> Option<SelectorEvent> {
        self.requests += 1;
        let next = self.projection.fitted_to(request);
        if same_view(&self.projection, &next) {
            log::debug!("[map] region unchanged; no settle");
            return None;
        }
        self.projection = next;
        log::info!(
            "[map] showing {:.1} m around ({:.6}, {:.6}), {:.3} m/px",
            request.span_meters,
            request.center.latitude,
            request.center.longitude,
            next.meters_per_pixel(request.center.latitude)
        );
        Some(self.settled_event())
    }

    fn apply(&mut self, command: &Command) -> Option<SelectorEvent> {
        match command {
            Command::RequestViewport(request) => self.apply_request(request),
            Command::SetOverlay(geometry) => {
                log::info!(
                    "[map] overlay {:.1} px at ({:.1}, {:.1})",
                    geometry.diameter_px,
                    geometry.screen_center.x,
                    geometry.screen_center.y
                );
                self.overlay = Some(*geometry);
                None
            }
            Command::StopLocationUpdates => {
                self.location_updates = false;
                None
            }
            Command::RequestLocation => {
                log::info!("[location] single fix requested");
                None
            }
        }
    }

    /// Feed `event` to the selector and follow the resulting settle
    /// notifications until the map stops moving.
    pub fn dispatch(&mut self, selector: &mut RadiusSelector, event: SelectorEvent) {
        let mut queue = VecDeque::from([event]);
        let mut rounds = 0;
        while let Some(event) = queue.pop_front() {
            if matches!(event, SelectorEvent::ViewportSettled { .. }) {
                rounds += 1;
                if rounds > MAX_SETTLE_ROUNDS {
                    log::warn!("[map] settle loop did not converge; dropping notifications");
                    return;
                }
            }
            for command in selector.handle(event) {
                queue.extend(self.apply(&command));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geofence_core::SelectorConfig;

    fn selector() -> RadiusSelector {
        RadiusSelector::new(SelectorConfig::default().with_surface_width(300.0))
            .expect("valid config")
    }

    #[test]
    fn fix_then_drag_converges() {
        let mut map = SimulatedMap::new(DVec2::new(300.0, 300.0));
        let mut sel = selector();
        map.dispatch(&mut sel, map.settled_event());
        map.dispatch(&mut sel, SelectorEvent::LocationFix(GeoCoordinate::new(52.52, 13.40)));
        assert!(!map.location_updates_active());

        let center = map.projection().screen_center();
        map.dispatch(
            &mut sel,
            SelectorEvent::PointerDown {
                point: center,
                on_surface: true,
            },
        );
        map.dispatch(
            &mut sel,
            SelectorEvent::PointerMove {
                point: center + DVec2::new(30.0, 0.0),
                on_surface: true,
            },
        );
        map.dispatch(&mut sel, SelectorEvent::PointerUp);

        let overlay = map.overlay().expect("overlay shown");
        assert!((overlay.diameter_px - 120.0).abs() < 1e-3, "got {}", overlay.diameter_px);
        let meters = map.projection().meters_per_pixel(52.52) * 300.0;
        assert!((meters - 5.0 * sel.radius_m()).abs() < 1e-3);
    }

    #[test]
    fn repeated_settles_stop_once_region_matches() {
        let mut map = SimulatedMap::new(DVec2::new(300.0, 300.0));
        let mut sel = selector();
        map.dispatch(&mut sel, SelectorEvent::LocationFix(GeoCoordinate::new(0.0, 0.0)));
        let before = map.viewport_requests();
        map.dispatch(&mut sel, map.settled_event());
        // One echo request, recognised as unchanged.
        assert_eq!(map.viewport_requests(), before + 1);
    }
}
