use std::time::Duration;
use viewport_charts::animation::Easing;
use viewport_charts::config::ChartConfig;
use viewport_charts::legend::{LegendForm, LegendOrientation};
use viewport_charts::BarLineChart;

#[test]
fn test_defaults_are_valid() {
    let config = ChartConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.viewport.min_scale_x, 1.0);
    assert_eq!(config.viewport.max_scale_x, 0.0);
    assert!(config.interaction.drag_x_enabled);
    assert!(!config.interaction.pinch_zoom);
    assert_eq!(config.interaction.max_highlight_distance, 500.0);
    assert_eq!(config.layout.min_offset, 10.0);
    assert_eq!(config.animation.duration_x(), None);
}

#[test]
fn test_partial_json_fills_defaults() {
    let json = r#"{
        "interaction": { "pinch_zoom": true, "drag_deceleration_friction": 0.5 },
        "animation": { "duration_x_ms": 300, "easing_x": "OutBounce" }
    }"#;
    let config = ChartConfig::from_json(json).unwrap();
    assert!(config.interaction.pinch_zoom);
    assert_eq!(config.interaction.drag_deceleration_friction, 0.5);
    assert!(config.interaction.scale_y_enabled);
    assert_eq!(config.animation.duration_x(), Some(Duration::from_millis(300)));
    assert_eq!(config.animation.easing_x, Easing::OutBounce);
    assert_eq!(config.animation.easing_y, Easing::InOutQuad);
    assert_eq!(config.viewport, ChartConfig::default().viewport);
}

#[test]
fn test_json_round_trip() {
    let mut config = ChartConfig::default();
    config.layout.extra_left_offset = 12.0;
    config.viewport.max_scale_x = 8.0;
    let json = config.to_json().unwrap();
    assert_eq!(ChartConfig::from_json(&json).unwrap(), config);
}

#[test]
fn test_invalid_values_are_rejected() {
    let cases = [
        r#"{ "viewport": { "min_scale_x": 0.5 } }"#,
        r#"{ "viewport": { "min_scale_y": 2.0, "max_scale_y": 1.5 } }"#,
        r#"{ "viewport": { "drag_offset_x": -1.0 } }"#,
        r#"{ "interaction": { "drag_deceleration_friction": 1.0 } }"#,
        r#"{ "interaction": { "zoom_sensitivity": 0.0 } }"#,
        r#"{ "layout": { "bar_width": 1.5 } }"#,
        r#"{ "layout": { "min_offset": -3.0 } }"#,
    ];
    for json in cases {
        assert!(ChartConfig::from_json(json).is_err(), "accepted {json}");
    }
}

#[test]
fn test_malformed_json_reports_context() {
    let err = ChartConfig::from_json("{ not json").unwrap_err();
    assert!(format!("{err}").contains("invalid chart config JSON"));
}

#[test]
fn test_missing_file_is_an_error() {
    let err = ChartConfig::from_path("/nonexistent/chart-config.json").unwrap_err();
    assert!(format!("{err}").contains("chart-config.json"));
}

#[test]
fn test_config_applies_to_chart() {
    let json = r#"{
        "viewport": { "max_scale_x": 4.0, "drag_offset_x": 20.0 },
        "interaction": { "max_highlight_distance": 42.0 },
        "layout": { "bar_width": 0.5 }
    }"#;
    let config = ChartConfig::from_json(json).unwrap();
    let chart = BarLineChart::with_config(&config);

    assert_eq!(chart.viewport().max_scale_x(), 4.0);
    assert!(!chart.viewport().has_no_drag_offset());
    assert_eq!(chart.highlighter().max_highlight_distance, 42.0);
    assert_eq!(chart.data().bar_width, 0.5);
}

#[test]
fn test_legend_section_parses_and_validates() {
    let json = r#"{
        "legend": { "enabled": true, "orientation": "Vertical", "form": "Circle" }
    }"#;
    let config = ChartConfig::from_json(json).unwrap();
    assert!(config.legend.enabled);
    assert_eq!(config.legend.orientation, LegendOrientation::Vertical);
    assert_eq!(config.legend.form, LegendForm::Circle);
    assert_eq!(config.legend.form_size, 8.0);

    let chart = BarLineChart::with_config(&config);
    assert!(chart.legend.config.enabled);

    let json = r#"{ "legend": { "max_size_percent": 1.5 } }"#;
    assert!(ChartConfig::from_json(json).is_err());
}
