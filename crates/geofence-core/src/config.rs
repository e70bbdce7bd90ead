//! Tunables for a [`crate::RadiusSelector`].
//!
//! Defaults come from [`crate::constants`]; `from_env` lets a front-end
//! override them through `GEOFENCE_*` environment variables.

use crate::constants::*;
use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq)]
pub struct SelectorConfig {
    pub initial_radius_m: f64,
    pub min_radius_m: f64,
    /// Growth cap. A grow step that reaches it leaves the radius unchanged,
    /// the one place an outward drag does not strictly enlarge the circle.
    pub max_radius_m: f64,
    pub region_span_multiplier: f64,
    pub surface_width_px: f64,
    pub initial_overlay_diameter_px: f64,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            initial_radius_m: DEFAULT_RADIUS_METERS,
            min_radius_m: MIN_RADIUS_METERS,
            max_radius_m: MAX_RADIUS_METERS,
            region_span_multiplier: REGION_SPAN_MULTIPLIER,
            surface_width_px: DEFAULT_SURFACE_WIDTH_PX,
            initial_overlay_diameter_px: DEFAULT_OVERLAY_DIAMETER_PX,
        }
    }
}

#[inline]
fn positive_finite(x: f64) -> bool {
    x.is_finite() && x > 0.0
}

fn env_or(key: &str, fallback: f64) -> f64 {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("[config] ignoring {key}={raw:?}: not a number");
            fallback
        }),
        Err(_) => fallback,
    }
}

impl SelectorConfig {
    /// Defaults overridden by any `GEOFENCE_*` variables that parse as numbers.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base = Self::default();
        let config = Self {
            initial_radius_m: env_or("GEOFENCE_RADIUS_M", base.initial_radius_m),
            min_radius_m: env_or("GEOFENCE_MIN_RADIUS_M", base.min_radius_m),
            max_radius_m: env_or("GEOFENCE_MAX_RADIUS_M", base.max_radius_m),
            region_span_multiplier: env_or("GEOFENCE_SPAN_MULTIPLIER", base.region_span_multiplier),
            surface_width_px: env_or("GEOFENCE_SURFACE_WIDTH", base.surface_width_px),
            initial_overlay_diameter_px: env_or(
                "GEOFENCE_OVERLAY_DIAMETER",
                base.initial_overlay_diameter_px,
            ),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_surface_width(mut self, width_px: f64) -> Self {
        self.surface_width_px = width_px;
        self
    }

    pub fn with_initial_radius(mut self, radius_m: f64) -> Self {
        self.initial_radius_m = radius_m;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !positive_finite(self.surface_width_px) {
            return Err(ConfigError::SurfaceWidth(self.surface_width_px));
        }
        if !positive_finite(self.min_radius_m) {
            return Err(ConfigError::MinRadius(self.min_radius_m));
        }
        if !positive_finite(self.max_radius_m) {
            return Err(ConfigError::MaxRadius(self.max_radius_m));
        }
        if self.min_radius_m > self.max_radius_m {
            return Err(ConfigError::RadiusBounds {
                min: self.min_radius_m,
                max: self.max_radius_m,
            });
        }
        if !(self.min_radius_m..=self.max_radius_m).contains(&self.initial_radius_m) {
            return Err(ConfigError::InitialRadius {
                radius: self.initial_radius_m,
                min: self.min_radius_m,
                max: self.max_radius_m,
            });
        }
        if !(self.region_span_multiplier.is_finite() && self.region_span_multiplier > 2.0) {
            return Err(ConfigError::SpanMultiplier(self.region_span_multiplier));
        }
        if !positive_finite(self.initial_overlay_diameter_px) {
            return Err(ConfigError::OverlayDiameter(self.initial_overlay_diameter_px));
        }
        Ok(())
    }
}
