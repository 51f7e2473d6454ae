use ohlc_view::ChartError;
use ohlc_view::api::{ChartStyle, ChartViewConfig};
use ohlc_view::core::LabelTimeZone;
use ohlc_view::interaction::WheelZoomBehavior;
use ohlc_view::render::Color;

#[test]
fn default_config_uses_fixed_wheel_factors() {
    let config = ChartViewConfig::default();
    assert_eq!(config.wheel_zoom.positive_delta_factor, 1.1);
    assert_eq!(config.wheel_zoom.negative_delta_factor, 0.9);
    assert_eq!(config.wheel_zoom.min_scale, 1.0);
    assert_eq!(config.label_time_zone, LabelTimeZone::Local);
    config.validate().expect("default config is valid");
}

#[test]
fn config_survives_json() {
    let config = ChartViewConfig::default()
        .with_label_time_zone(LabelTimeZone::FixedOffsetSeconds(7_200))
        .with_style(ChartStyle {
            up_color: Color::rgb(0.1, 0.7, 0.3),
            body_width_ratio: 0.8,
            ..ChartStyle::default()
        });

    let json = config.to_json_pretty().expect("serialize");
    let restored = ChartViewConfig::from_json_str(&json).expect("parse");
    assert_eq!(restored, config);
}

#[test]
fn missing_sections_fall_back_to_defaults() {
    let config = ChartViewConfig::from_json_str("{}").expect("parse empty object");
    assert_eq!(config, ChartViewConfig::default());
}

#[test]
fn invalid_json_values_are_rejected() {
    let mut config = ChartViewConfig::default().with_wheel_zoom(WheelZoomBehavior {
        positive_delta_factor: -1.0,
        ..WheelZoomBehavior::default()
    });
    let json = serde_json::to_string(&config).expect("serialize");
    let err = ChartViewConfig::from_json_str(&json).expect_err("negative factor must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));

    config = ChartViewConfig::default().with_style(ChartStyle {
        body_width_ratio: 1.5,
        ..ChartStyle::default()
    });
    assert!(config.validate().is_err());
}

#[test]
fn malformed_json_is_reported_as_invalid_data() {
    let err = ChartViewConfig::from_json_str("{ not json").expect_err("must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}
