// Integration tests for constants, defaults and configuration validation.

use geofence_core::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_are_within_reasonable_bounds() {
    assert!(EARTH_RADIUS_METERS > 6_000_000.0 && EARTH_RADIUS_METERS < 7_000_000.0);
    assert_eq!(WORLD_SIZE_UNITS, (1u64 << 28) as f64);
    assert!(MAX_LATITUDE_DEG > 85.0 && MAX_LATITUDE_DEG < 85.1);

    assert!(MIN_RADIUS_METERS > 0.0);
    assert!(MIN_RADIUS_METERS < DEFAULT_RADIUS_METERS);
    assert!(DEFAULT_RADIUS_METERS < MAX_RADIUS_METERS);

    // The whole circle plus margin has to fit in the requested region.
    assert!(REGION_SPAN_MULTIPLIER > 2.0);
    assert!(DEFAULT_OVERLAY_DIAMETER_PX < DEFAULT_SURFACE_WIDTH_PX);
}

#[test]
fn default_config_is_valid() {
    let config = SelectorConfig::default();
    assert_eq!(config.validate(), Ok(()));
    assert_eq!(config.initial_radius_m, DEFAULT_RADIUS_METERS);
    assert_eq!(config.region_span_multiplier, REGION_SPAN_MULTIPLIER);
}

#[test]
fn config_validation_rejects_bad_values() {
    let base = SelectorConfig::default();
    assert_eq!(
        base.clone().with_surface_width(0.0).validate(),
        Err(ConfigError::SurfaceWidth(0.0))
    );
    assert!(matches!(
        base.clone().with_surface_width(f64::NAN).validate(),
        Err(ConfigError::SurfaceWidth(_))
    ));
    assert_eq!(
        SelectorConfig {
            min_radius_m: 0.0,
            ..base.clone()
        }
        .validate(),
        Err(ConfigError::MinRadius(0.0))
    );
    assert!(matches!(
        SelectorConfig {
            min_radius_m: 10.0,
            max_radius_m: 1.0,
            ..base.clone()
        }
        .validate(),
        Err(ConfigError::RadiusBounds { .. })
    ));
    assert!(matches!(
        base.clone().with_initial_radius(0.0).validate(),
        Err(ConfigError::InitialRadius { .. })
    ));
    assert_eq!(
        SelectorConfig {
            region_span_multiplier: 2.0,
            ..base.clone()
        }
        .validate(),
        Err(ConfigError::SpanMultiplier(2.0))
    );
    assert_eq!(
        SelectorConfig {
            initial_overlay_diameter_px: -5.0,
            ..base
        }
        .validate(),
        Err(ConfigError::OverlayDiameter(-5.0))
    );
}

#[test]
fn config_validation_rejects_infinite_values() {
    let base = SelectorConfig::default();
    let inf = f64::INFINITY;
    assert_eq!(
        base.clone().with_surface_width(inf).validate(),
        Err(ConfigError::SurfaceWidth(inf))
    );
    assert_eq!(
        SelectorConfig {
            max_radius_m: inf,
            ..base.clone()
        }
        .validate(),
        Err(ConfigError::MaxRadius(inf))
    );
    assert_eq!(
        SelectorConfig {
            region_span_multiplier: inf,
            ..base.clone()
        }
        .validate(),
        Err(ConfigError::SpanMultiplier(inf))
    );
    assert_eq!(
        SelectorConfig {
            initial_overlay_diameter_px: inf,
            ..base.clone()
        }
        .validate(),
        Err(ConfigError::OverlayDiameter(inf))
    );

    // An infinite cap never reaches the region request.
    let unbounded = SelectorConfig {
        max_radius_m: inf,
        region_span_multiplier: inf,
        ..base
    };
    assert!(RadiusSelector::new(unbounded).is_err());

    let mut drag = DragController::new(&SelectorConfig::default());
    assert_eq!(drag.set_surface_width(inf), Err(ConfigError::SurfaceWidth(inf)));
    assert_eq!(drag.surface_width_px(), DEFAULT_SURFACE_WIDTH_PX);
}

#[test]
fn env_overrides_and_ignores_garbage() {
    std::env::set_var("GEOFENCE_RADIUS_M", "350");
    std::env::set_var("GEOFENCE_SURFACE_WIDTH", "not-a-number");
    let config = SelectorConfig::from_env().expect("valid");
    std::env::remove_var("GEOFENCE_RADIUS_M");
    std::env::remove_var("GEOFENCE_SURFACE_WIDTH");

    assert_eq!(config.initial_radius_m, 350.0);
    assert_eq!(config.surface_width_px, DEFAULT_SURFACE_WIDTH_PX);

    // "inf" parses as a number, so validation has to catch it.
    std::env::set_var("GEOFENCE_SPAN_MULTIPLIER", "inf");
    let result = SelectorConfig::from_env();
    std::env::remove_var("GEOFENCE_SPAN_MULTIPLIER");
    assert!(matches!(result, Err(ConfigError::SpanMultiplier(_))));
}

#[test]
fn error_messages_are_readable() {
    let err = SelectorError::DegenerateDrag { ratio: 1.25 };
    assert_eq!(
        err.to_string(),
        "degenerate drag: shrink ratio 1.250 would collapse the radius"
    );
    assert_eq!(
        SelectorError::LocationUnavailable("denied".into()).to_string(),
        "location unavailable: denied"
    );
}
