//! Plain value types shared by the projection, drag and region modules.

use glam::DVec2;

/// Screen-space position in the interaction surface's local pixels (y down).
pub type Point = DVec2;

/// WGS84 latitude/longitude in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Component-wise comparison within `tolerance_deg` degrees.
    pub fn approx_eq(&self, other: &GeoCoordinate, tolerance_deg: f64) -> bool {
        (self.latitude - other.latitude).abs() <= tolerance_deg
            && (self.longitude - other.longitude).abs() <= tolerance_deg
    }
}

/// Fixed compass directions used to measure distances on the projected plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bearing {
    North,
    East,
    South,
    West,
}

impl Bearing {
    /// Unit step in projected-map space (x grows east, y grows south).
    #[inline]
    pub fn unit(self) -> DVec2 {
        match self {
            Bearing::North => DVec2::new(0.0, -1.0),
            Bearing::East => DVec2::new(1.0, 0.0),
            Bearing::South => DVec2::new(0.0, 1.0),
            Bearing::West => DVec2::new(-1.0, 0.0),
        }
    }
}

/// Geographic bounding box of a viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl GeoBounds {
    /// True when the box spans the 180° line. Unwrapped projections report
    /// this as `east > 180`; wrapped ones as `west > east`.
    pub fn crosses_antimeridian(&self) -> bool {
        self.east - self.west < 360.0 && wrap_longitude(self.west) > wrap_longitude(self.east)
    }

    pub fn contains(&self, c: GeoCoordinate) -> bool {
        if c.latitude > self.north || c.latitude < self.south {
            return false;
        }
        if self.east - self.west >= 360.0 {
            return true;
        }
        let lon = wrap_longitude(c.longitude);
        let (west, east) = (wrap_longitude(self.west), wrap_longitude(self.east));
        if west <= east {
            lon >= west && lon <= east
        } else {
            lon >= west || lon <= east
        }
    }
}

/// Longitude folded into `[-180, 180)`.
#[inline]
pub fn wrap_longitude(longitude: f64) -> f64 {
    (longitude + 180.0).rem_euclid(360.0) - 180.0
}
