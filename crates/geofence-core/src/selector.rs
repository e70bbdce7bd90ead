//! Event-driven facade over the drag controller and region synchronizer.
//!
//! Every inbound notification from the input, location and map collaborators
//! is a method (or a [`SelectorEvent`] passed to [`RadiusSelector::handle`])
//! that runs to completion and returns the [`Command`]s the collaborators
//! should apply. The selector never calls out on its own.

use crate::config::SelectorConfig;
use crate::drag::DragController;
use crate::error::{ConfigError, SelectorError};
use crate::geo::{GeoCoordinate, Point};
use crate::projection::ProjectionState;
use crate::region::{OverlayGeometry, RegionSynchronizer, ViewportRequest};
use smallvec::SmallVec;

/// Outbound instruction for a collaborator.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Map widget: show this region.
    RequestViewport(ViewportRequest),
    /// Map widget: draw (and show) the circle overlay here.
    SetOverlay(OverlayGeometry),
    /// Location service: stop continuous updates.
    StopLocationUpdates,
    /// Location service: deliver a single fix.
    RequestLocation,
}

pub type Commands = SmallVec<[Command; 4]>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthorizationStatus {
    NotDetermined,
    Restricted,
    Denied,
    AuthorizedAlways,
    AuthorizedWhenInUse,
}

impl AuthorizationStatus {
    pub fn is_authorized(self) -> bool {
        matches!(
            self,
            AuthorizationStatus::AuthorizedAlways | AuthorizationStatus::AuthorizedWhenInUse
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SelectorEvent {
    AuthorizationChanged(AuthorizationStatus),
    LocationFix(GeoCoordinate),
    LocationError(String),
    PointerDown { point: Point, on_surface: bool },
    PointerMove { point: Point, on_surface: bool },
    PointerUp,
    ViewportSettled {
        center: GeoCoordinate,
        projection: ProjectionState,
    },
}

/// Snapshot of the current pick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Selection {
    pub center: GeoCoordinate,
    pub radius_m: f64,
}

#[derive(Clone, Debug)]
pub struct RadiusSelector {
    drag: DragController,
    region: RegionSynchronizer,
    overlay: OverlayGeometry,
    overlay_visible: bool,
}

impl RadiusSelector {
    pub fn new(config: SelectorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(&config))
    }

    fn build(config: &SelectorConfig) -> Self {
        Self {
            drag: DragController::new(config),
            region: RegionSynchronizer::new(config.region_span_multiplier),
            overlay: OverlayGeometry {
                diameter_px: config.initial_overlay_diameter_px,
                screen_center: Point::new(config.surface_width_px / 2.0, 0.0),
            },
            overlay_visible: false,
        }
    }

    pub fn radius_m(&self) -> f64 {
        self.drag.radius_m()
    }

    pub fn center(&self) -> Option<GeoCoordinate> {
        self.region.center()
    }

    pub fn projection(&self) -> Option<&ProjectionState> {
        self.region.projection()
    }

    pub fn selection(&self) -> Option<Selection> {
        self.region.center().map(|center| Selection {
            center,
            radius_m: self.drag.radius_m(),
        })
    }

    pub fn overlay(&self) -> OverlayGeometry {
        self.overlay
    }

    pub fn overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn set_surface_width(&mut self, width_px: f64) -> Result<(), ConfigError> {
        self.drag.set_surface_width(width_px)
    }

    pub fn handle(&mut self, event: SelectorEvent) -> Commands {
        match event {
            SelectorEvent::AuthorizationChanged(status) => self.on_authorization_changed(status),
            SelectorEvent::LocationFix(c) => self.on_location_fix(c),
            SelectorEvent::LocationError(reason) => self.on_location_error(&reason),
            SelectorEvent::PointerDown { point, on_surface } => {
                self.on_pointer_down(point, on_surface)
            }
            SelectorEvent::PointerMove { point, on_surface } => {
                self.on_pointer_move(point, on_surface)
            }
            SelectorEvent::PointerUp => self.on_pointer_up(),
            SelectorEvent::ViewportSettled { center, projection } => {
                self.on_viewport_settled(center, projection)
            }
        }
    }

    pub fn on_authorization_changed(&mut self, status: AuthorizationStatus) -> Commands {
        let mut out = Commands::new();
        match status {
            s if s.is_authorized() => {
                log::info!("[location] authorized ({:?}); requesting a fix", s);
                out.push(Command::RequestLocation);
            }
            AuthorizationStatus::NotDetermined => {
                log::debug!("[location] authorization not determined yet");
            }
            s => {
                let err = SelectorError::LocationUnavailable(format!("authorization {:?}", s));
                log::warn!("[location] {}", err);
            }
        }
        out
    }

    /// Every fix replaces the center and re-frames the map; repeats are not
    /// suppressed.
    pub fn on_location_fix(&mut self, coordinate: GeoCoordinate) -> Commands {
        let mut out = Commands::new();
        if !coordinate.is_finite() {
            let err = SelectorError::LocationUnavailable(format!("non-finite fix {:?}", coordinate));
            log::warn!("[location] {}", err);
            return out;
        }
        log::info!(
            "[location] fix ({:.6}, {:.6})",
            coordinate.latitude,
            coordinate.longitude
        );
        out.push(Command::StopLocationUpdates);
        self.region.set_center(coordinate);
        self.push_region_request(&mut out);
        self.refresh_overlay();
        self.push_overlay(&mut out);
        out
    }

    pub fn on_location_error(&mut self, reason: &str) -> Commands {
        let err = SelectorError::LocationUnavailable(reason.to_string());
        log::warn!("[location] {}", err);
        Commands::new()
    }

    pub fn on_pointer_down(&mut self, point: Point, on_surface: bool) -> Commands {
        if !on_surface {
            log::debug!("[drag] pointer down off the interaction surface; ignored");
            return Commands::new();
        }
        if self.drag.is_dragging() {
            log::debug!("[drag] pointer down during an open gesture; restarting");
        }
        let center_x = self.overlay_center().x;
        let session = self.drag.begin(point, center_x);
        log::info!(
            "[drag] begin at ({:.1}, {:.1}) offset {:.1} radius {:.1} m",
            point.x,
            point.y,
            session.previous_x_offset_from_center,
            self.drag.radius_m()
        );
        Commands::new()
    }

    pub fn on_pointer_move(&mut self, point: Point, on_surface: bool) -> Commands {
        let mut out = Commands::new();
        if !self.drag.is_dragging() {
            return out;
        }
        if !on_surface {
            log::debug!("[drag] pointer off surface at ({:.1}, {:.1})", point.x, point.y);
            return out;
        }
        let center_x = self.overlay_center().x;
        let Some(step) = self.drag.update(point, center_x) else {
            return out;
        };
        if let Some(err) = step.degenerate() {
            log::warn!("[drag] {}; radius now {:.3} m", err, step.radius_m);
        } else if step.clamped {
            log::debug!("[drag] radius clamped to {:.3} m", step.radius_m);
        }
        log::debug!(
            "[drag] {:?} ratio {:.4} radius {:.2} -> {:.2} m",
            step.direction,
            step.delta_ratio,
            step.previous_radius_m,
            step.radius_m
        );
        self.overlay_visible = true;
        self.refresh_overlay();
        self.push_overlay(&mut out);
        out
    }

    /// Ends the gesture: one viewport request for the final radius and one
    /// overlay update measured against the region that request produces.
    pub fn on_pointer_up(&mut self) -> Commands {
        let mut out = Commands::new();
        let Some(session) = self.drag.end() else {
            log::debug!("[drag] pointer up without an open gesture; ignored");
            return out;
        };
        let radius_m = self.drag.radius_m();
        log::info!(
            "[drag] end at ({:.1}, {:.1}); radius {:.1} m",
            session.previous_point.x,
            session.previous_point.y,
            radius_m
        );
        match self.region.region_for(radius_m) {
            Ok(request) => {
                log::info!(
                    "[region] request span {:.1} m around ({:.6}, {:.6})",
                    request.span_meters,
                    request.center.latitude,
                    request.center.longitude
                );
                out.push(Command::RequestViewport(request));
                match self.region.overlay_after(radius_m, &request) {
                    Ok(geometry) => self.adopt_overlay(geometry),
                    Err(err) => {
                        log::debug!("[region] overlay deferred: {}", err);
                        self.refresh_overlay();
                    }
                }
            }
            Err(err) => {
                log::warn!("[region] no viewport request: {}", err);
                self.refresh_overlay();
            }
        }
        self.push_overlay(&mut out);
        out
    }

    /// Map widget reports a new center and transform (user pan/zoom, or the
    /// settle of our own request).
    pub fn on_viewport_settled(
        &mut self,
        center: GeoCoordinate,
        projection: ProjectionState,
    ) -> Commands {
        let mut out = Commands::new();
        if let Err(err) = self.region.set_projection(projection) {
            log::warn!("[viewport] rejected projection {:?}: {}", projection, err);
        }
        if !center.is_finite() {
            log::warn!("[viewport] ignoring non-finite center {:?}", center);
            return out;
        }
        match self.region.on_viewport_changed(center, self.drag.radius_m()) {
            Ok(request) => out.push(Command::RequestViewport(request)),
            Err(err) => log::debug!("[viewport] {}", err),
        }
        self.refresh_overlay();
        self.push_overlay(&mut out);
        out
    }

    fn push_region_request(&self, out: &mut Commands) {
        match self.region.region_for(self.drag.radius_m()) {
            Ok(request) => out.push(Command::RequestViewport(request)),
            Err(err) => log::debug!("[region] {}", err),
        }
    }

    fn push_overlay(&self, out: &mut Commands) {
        if self.overlay_visible {
            out.push(Command::SetOverlay(self.overlay));
        }
    }

    fn adopt_overlay(&mut self, geometry: OverlayGeometry) {
        self.drag.sync_overlay_diameter(geometry.diameter_px);
        self.overlay = geometry;
    }

    /// Re-measure against the live projection, or fall back to the
    /// drag-scaled diameter while center or projection are unknown.
    fn refresh_overlay(&mut self) {
        match self.region.overlay_for(self.drag.radius_m()) {
            Ok(geometry) => self.adopt_overlay(geometry),
            Err(err) => {
                log::debug!("[region] overlay from drag scale only: {}", err);
                self.overlay = OverlayGeometry {
                    diameter_px: self.drag.overlay_diameter_px(),
                    screen_center: self.overlay_center(),
                };
            }
        }
    }

    fn overlay_center(&self) -> Point {
        match (self.region.center(), self.region.projection()) {
            (Some(center), Some(projection)) => projection.geo_to_screen(center),
            (None, Some(projection)) => projection.screen_center(),
            _ => self.overlay.screen_center,
        }
    }
}

impl Default for RadiusSelector {
    fn default() -> Self {
        Self::build(&SelectorConfig::default())
    }
}
