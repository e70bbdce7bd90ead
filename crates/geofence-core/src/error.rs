use thiserror::Error;

/// Recoverable conditions raised while driving a selection.
///
/// None of these are fatal: the event handlers on [`crate::RadiusSelector`]
/// log them and keep the last-known-good state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectorError {
    #[error("location unavailable: {0}")]
    LocationUnavailable(String),
    #[error("degenerate drag: shrink ratio {ratio:.3} would collapse the radius")]
    DegenerateDrag { ratio: f64 },
    #[error("no map projection has been reported yet")]
    ProjectionUnavailable,
    #[error("no selection center has been set yet")]
    CenterUnset,
}

/// Rejected [`crate::SelectorConfig`] values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("interaction surface width must be positive and finite, got {0}")]
    SurfaceWidth(f64),
    #[error("minimum radius must be positive and finite, got {0}")]
    MinRadius(f64),
    #[error("maximum radius must be positive and finite, got {0}")]
    MaxRadius(f64),
    #[error("radius bounds are inverted: min {min} > max {max}")]
    RadiusBounds { min: f64, max: f64 },
    #[error("initial radius {radius} lies outside [{min}, {max}]")]
    InitialRadius { radius: f64, min: f64, max: f64 },
    #[error("region span multiplier must be finite and exceed 2.0 to keep the circle visible, got {0}")]
    SpanMultiplier(f64),
    #[error("initial overlay diameter must be positive and finite, got {0}")]
    OverlayDiameter(f64),
}
