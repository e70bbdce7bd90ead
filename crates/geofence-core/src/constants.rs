// Shared tuning constants for the projection, drag and region-sync logic.

// Spherical Web Mercator
pub const EARTH_RADIUS_METERS: f64 = 6_378_137.0;
pub const WORLD_SIZE_UNITS: f64 = 268_435_456.0; // 2^28 projected units across the world
pub const MAX_LATITUDE_DEG: f64 = 85.051_128_78; // Mercator cut-off, keeps tan() finite

// Selection defaults
pub const DEFAULT_RADIUS_METERS: f64 = 200.0;
pub const MIN_RADIUS_METERS: f64 = 0.01; // floor applied to degenerate shrink steps
pub const MAX_RADIUS_METERS: f64 = 5_000_000.0; // cap so 5x the radius still fits on the map

// Region framing
pub const REGION_SPAN_MULTIPLIER: f64 = 5.0; // viewport span as a multiple of the radius

// Interaction surface / overlay
pub const DEFAULT_SURFACE_WIDTH_PX: f64 = 375.0;
pub const DEFAULT_OVERLAY_DIAMETER_PX: f64 = 150.0; // used until a projection is known

#[inline]
pub fn earth_circumference_meters() -> f64 {
    2.0 * std::f64::consts::PI * EARTH_RADIUS_METERS
}
