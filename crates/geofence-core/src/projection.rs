//! Spherical Web Mercator scale and screen conversions.
//!
//! Projected coordinates live in a square world `WORLD_SIZE_UNITS` wide with
//! x growing east from the antimeridian and y growing south from the
//! Mercator cut-off, matching the map-point space of common slippy/mobile map
//! widgets so pixel measurements agree with what they render.
//!
//! Everything here is a pure function of its inputs and a [`ProjectionState`]
//! snapshot reported by the map widget.

use crate::constants::{earth_circumference_meters, MAX_LATITUDE_DEG, WORLD_SIZE_UNITS};
use crate::geo::{Bearing, GeoBounds, GeoCoordinate, Point};
use crate::region::ViewportRequest;
use glam::DVec2;
use std::f64::consts::{FRAC_PI_4, PI};

#[inline]
pub fn clamp_latitude(latitude: f64) -> f64 {
    latitude.clamp(-MAX_LATITUDE_DEG, MAX_LATITUDE_DEG)
}

/// Projected map units spanned by one meter at `latitude`.
#[inline]
pub fn projected_units_per_meter(latitude: f64) -> f64 {
    let cos_lat = clamp_latitude(latitude).to_radians().cos();
    WORLD_SIZE_UNITS / (earth_circumference_meters() * cos_lat)
}

/// Meters covered by one projected map unit at `latitude`.
///
/// Shrinks toward the poles: a fixed on-map distance covers less ground the
/// further it sits from the equator.
#[inline]
pub fn meters_per_projected_unit(latitude: f64) -> f64 {
    1.0 / projected_units_per_meter(latitude)
}

pub fn project(c: GeoCoordinate) -> DVec2 {
    let x = (c.longitude + 180.0) / 360.0 * WORLD_SIZE_UNITS;
    let lat = clamp_latitude(c.latitude).to_radians();
    let merc = (FRAC_PI_4 + lat / 2.0).tan().ln();
    let y = (0.5 - merc / (2.0 * PI)) * WORLD_SIZE_UNITS;
    DVec2::new(x, y)
}

pub fn unproject(p: DVec2) -> GeoCoordinate {
    let longitude = p.x / WORLD_SIZE_UNITS * 360.0 - 180.0;
    let n = PI * (1.0 - 2.0 * p.y / WORLD_SIZE_UNITS);
    let latitude = n.sinh().atan().to_degrees();
    GeoCoordinate::new(latitude, longitude)
}

/// Coordinate lying `meters` from `origin` along `bearing`, measured with the
/// projection's local scale at the origin's latitude.
pub fn offset_point_at_distance(origin: GeoCoordinate, meters: f64, bearing: Bearing) -> GeoCoordinate {
    let distance_units = meters * projected_units_per_meter(origin.latitude);
    unproject(project(origin) + bearing.unit() * distance_units)
}

/// Viewport-to-screen transform as last reported by the map widget.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectionState {
    /// Projected point displayed at the middle of the viewport.
    pub center: DVec2,
    /// Projected units covered by one screen pixel (the zoom level).
    pub units_per_pixel: f64,
    /// Viewport size in pixels.
    pub viewport_size: DVec2,
    /// Viewport top-left in interaction-surface coordinates.
    pub origin: Point,
}

impl ProjectionState {
    pub fn new(center: GeoCoordinate, units_per_pixel: f64, viewport_size: DVec2) -> Self {
        Self {
            center: project(center),
            units_per_pixel,
            viewport_size,
            origin: Point::ZERO,
        }
    }

    /// State showing `span_meters` of ground around `center` in both axes.
    pub fn for_region(center: GeoCoordinate, span_meters: f64, viewport_size: DVec2) -> Self {
        Self::new(center, 1.0, viewport_size).fitted(center, span_meters)
    }

    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// Usable for conversions: positive finite zoom and a non-empty viewport.
    pub fn is_valid(&self) -> bool {
        self.units_per_pixel.is_finite()
            && self.units_per_pixel > 0.0
            && self.viewport_size.x > 0.0
            && self.viewport_size.y > 0.0
            && self.center.is_finite()
    }

    pub fn center_coordinate(&self) -> GeoCoordinate {
        unproject(self.center)
    }

    /// Middle of the viewport in surface coordinates.
    #[inline]
    pub fn screen_center(&self) -> Point {
        self.origin + self.viewport_size * 0.5
    }

    pub fn geo_to_screen(&self, c: GeoCoordinate) -> Point {
        self.screen_center() + (project(c) - self.center) / self.units_per_pixel
    }

    pub fn screen_to_geo(&self, p: Point) -> GeoCoordinate {
        unproject(self.center + (p - self.screen_center()) * self.units_per_pixel)
    }

    /// Ground meters per screen pixel at `latitude` for the current zoom.
    pub fn meters_per_pixel(&self, latitude: f64) -> f64 {
        self.units_per_pixel * meters_per_projected_unit(latitude)
    }

    pub fn contains_screen_point(&self, p: Point) -> bool {
        let local = p - self.origin;
        local.x >= 0.0
            && local.y >= 0.0
            && local.x <= self.viewport_size.x
            && local.y <= self.viewport_size.y
    }

    pub fn visible_region(&self) -> GeoBounds {
        let top_left = self.screen_to_geo(self.origin);
        let bottom_right = self.screen_to_geo(self.origin + self.viewport_size);
        GeoBounds {
            north: top_left.latitude,
            south: bottom_right.latitude,
            east: bottom_right.longitude,
            west: top_left.longitude,
        }
    }

    /// Same viewport re-centred on `center` and zoomed so `span_meters` fits
    /// on both axes; the tighter axis decides the zoom.
    pub fn fitted(&self, center: GeoCoordinate, span_meters: f64) -> Self {
        let span_units = span_meters.abs() * projected_units_per_meter(center.latitude);
        let per_px = span_units / self.viewport_size;
        Self {
            center: project(center),
            units_per_pixel: per_px.x.max(per_px.y),
            viewport_size: self.viewport_size,
            origin: self.origin,
        }
    }

    /// The state a map widget ends up in after applying `request`.
    pub fn fitted_to(&self, request: &ViewportRequest) -> Self {
        self.fitted(request.center, request.span_meters)
    }
}
