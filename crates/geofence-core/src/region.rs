//! Keeps the selection center, the requested map region and the overlay's
//! pixel size consistent with each other.

use crate::constants::REGION_SPAN_MULTIPLIER;
use crate::error::SelectorError;
use crate::geo::{Bearing, GeoCoordinate, Point};
use crate::projection::{offset_point_at_distance, ProjectionState};

/// Circle overlay placement in interaction-surface pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayGeometry {
    pub diameter_px: f64,
    pub screen_center: Point,
}

impl OverlayGeometry {
    pub fn radius_px(&self) -> f64 {
        self.diameter_px * 0.5
    }
}

/// Region the map widget is asked to show: `span_meters` square around `center`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportRequest {
    pub center: GeoCoordinate,
    pub span_meters: f64,
}

impl ViewportRequest {
    pub fn around(center: GeoCoordinate, radius_m: f64, span_multiplier: f64) -> Self {
        Self {
            center,
            span_meters: radius_m.abs() * span_multiplier,
        }
    }
}

/// Pixel size of a `radius_m` circle at `center` under `projection`.
///
/// Measures the screen distance to the point `radius_m` due east of the
/// center, so the result tracks the map's current zoom at this latitude.
pub fn recompute_overlay_from_radius(
    center: GeoCoordinate,
    radius_m: f64,
    projection: &ProjectionState,
) -> OverlayGeometry {
    let screen_center = projection.geo_to_screen(center);
    let edge = projection.geo_to_screen(offset_point_at_distance(center, radius_m, Bearing::East));
    OverlayGeometry {
        diameter_px: (edge.x - screen_center.x).abs() * 2.0,
        screen_center,
    }
}

/// Viewport framing the whole circle plus margin.
pub fn region_for_selection(center: GeoCoordinate, radius_m: f64) -> ViewportRequest {
    ViewportRequest::around(center, radius_m, REGION_SPAN_MULTIPLIER)
}

/// Owner of the selection center and of the last reported projection.
#[derive(Clone, Debug)]
pub struct RegionSynchronizer {
    center: Option<GeoCoordinate>,
    projection: Option<ProjectionState>,
    span_multiplier: f64,
}

impl Default for RegionSynchronizer {
    fn default() -> Self {
        Self::new(REGION_SPAN_MULTIPLIER)
    }
}

impl RegionSynchronizer {
    pub fn new(span_multiplier: f64) -> Self {
        Self {
            center: None,
            projection: None,
            span_multiplier,
        }
    }

    pub fn center(&self) -> Option<GeoCoordinate> {
        self.center
    }

    pub fn projection(&self) -> Option<&ProjectionState> {
        self.projection.as_ref()
    }

    pub fn span_multiplier(&self) -> f64 {
        self.span_multiplier
    }

    pub fn set_center(&mut self, center: GeoCoordinate) {
        self.center = Some(center);
    }

    pub fn set_projection(&mut self, projection: ProjectionState) -> Result<(), SelectorError> {
        if !projection.is_valid() {
            return Err(SelectorError::ProjectionUnavailable);
        }
        self.projection = Some(projection);
        Ok(())
    }

    fn require_center(&self) -> Result<GeoCoordinate, SelectorError> {
        self.center.ok_or(SelectorError::CenterUnset)
    }

    fn require_projection(&self) -> Result<&ProjectionState, SelectorError> {
        self.projection.as_ref().ok_or(SelectorError::ProjectionUnavailable)
    }

    /// Region sized to `radius_m` around the stored center.
    pub fn region_for(&self, radius_m: f64) -> Result<ViewportRequest, SelectorError> {
        let center = self.require_center()?;
        Ok(ViewportRequest::around(center, radius_m, self.span_multiplier))
    }

    /// Replace the center wholesale and re-request a region for the
    /// unchanged radius. Feeding back a region this produced is a fixed point.
    pub fn on_viewport_changed(
        &mut self,
        new_center: GeoCoordinate,
        radius_m: f64,
    ) -> Result<ViewportRequest, SelectorError> {
        self.center = Some(new_center);
        self.region_for(radius_m)
    }

    /// Overlay for `radius_m` at the stored center under the current projection.
    pub fn overlay_for(&self, radius_m: f64) -> Result<OverlayGeometry, SelectorError> {
        let center = self.require_center()?;
        let projection = self.require_projection()?;
        Ok(recompute_overlay_from_radius(center, radius_m, projection))
    }

    /// Overlay as it will look once the widget has applied `request`.
    pub fn overlay_after(
        &self,
        radius_m: f64,
        request: &ViewportRequest,
    ) -> Result<OverlayGeometry, SelectorError> {
        let projection = self.require_projection()?.fitted_to(request);
        Ok(recompute_overlay_from_radius(request.center, radius_m, &projection))
    }
}
