use glam::DVec2;
use std::time::Duration;
use viewport_charts::bounds::VisibleXRange;
use viewport_charts::config::ChartConfig;
use viewport_charts::data_types::{ChartData, DataSet, Entry, LineStyle, SeriesStyle};
use viewport_charts::view_controller::{Deceleration, ScaleAxis, DOUBLE_TAP_ZOOM};
use viewport_charts::{BarLineChart, ViewController};

fn line_chart(config: &ChartConfig) -> BarLineChart {
    let entries = (0..50)
        .map(|i| Entry::new(i as f64, (i % 7) as f64))
        .collect();
    let set = DataSet::new("line", entries, SeriesStyle::Line(LineStyle::default()));
    let mut chart = BarLineChart::with_config(config);
    chart.set_data(ChartData::new(vec![set]));
    chart.set_dimensions(400.0, 300.0);
    chart
}

#[test]
fn test_compute_zoom_factor() {
    assert_eq!(ViewController::compute_zoom_factor(-100.0, 100.0), 2.0);
    assert_eq!(ViewController::compute_zoom_factor(100.0, 100.0), 0.5);
    assert_eq!(ViewController::compute_zoom_factor(0.0, 100.0), 1.0);
}

#[test]
fn test_content_location_origin_is_bottom_left() {
    let chart = line_chart(&ChartConfig::default());
    let vp = chart.viewport();
    let location =
        ViewController::content_location(&chart, vp.content_left(), vp.content_bottom());
    assert!(location.length() < 1e-9);

    let location = ViewController::content_location(&chart, vp.content_right(), vp.content_top());
    assert!((location.x - vp.content_width()).abs() < 1e-9);
    assert!((location.y + vp.content_height()).abs() < 1e-9);
}

#[test]
fn test_double_tap_zooms_both_axes() {
    let mut chart = line_chart(&ChartConfig::default());
    let center = chart.viewport().content_center();
    assert!(ViewController::double_tap_zoom(&mut chart, center.x, center.y));
    assert!((chart.viewport().scale_x() - DOUBLE_TAP_ZOOM).abs() < 1e-9);
    assert!((chart.viewport().scale_y() - DOUBLE_TAP_ZOOM).abs() < 1e-9);
    assert!(chart.visible_x_range() < chart.x_axis.base.axis_range);
}

#[test]
fn test_double_tap_respects_flags() {
    let mut config = ChartConfig::default();
    config.interaction.scale_y_enabled = false;
    let mut chart = line_chart(&config);
    assert!(ViewController::double_tap_zoom(&mut chart, 100.0, 100.0));
    assert!((chart.viewport().scale_x() - DOUBLE_TAP_ZOOM).abs() < 1e-9);
    assert_eq!(chart.viewport().scale_y(), 1.0);

    config.interaction.double_tap_to_zoom = false;
    let mut chart = line_chart(&config);
    assert!(!ViewController::double_tap_zoom(&mut chart, 100.0, 100.0));
    assert_eq!(chart.viewport().scale_x(), 1.0);
}

#[test]
fn test_pan_needs_zoom() {
    let mut chart = line_chart(&ChartConfig::default());
    assert!(!ViewController::can_drag(&chart));
    assert!(!ViewController::pan(&mut chart, DVec2::new(-40.0, 0.0)));

    chart.zoom(2.0, 1.0, 0.0, 0.0);
    assert!(ViewController::can_drag(&chart));
    assert!(ViewController::pan(&mut chart, DVec2::new(-40.0, 0.0)));
    assert!((chart.viewport().trans_x() + 40.0).abs() < 1e-9);

    // already at the left edge
    assert!(ViewController::pan(&mut chart, DVec2::new(40.0, 0.0)));
    assert!(!ViewController::pan(&mut chart, DVec2::new(40.0, 0.0)));
    assert_eq!(chart.viewport().trans_x(), 0.0);
}

#[test]
fn test_pan_honours_drag_flags() {
    let mut config = ChartConfig::default();
    config.interaction.drag_x_enabled = false;
    let mut chart = line_chart(&config);
    chart.zoom(2.0, 1.0, 0.0, 0.0);
    assert!(!ViewController::pan(&mut chart, DVec2::new(-40.0, 0.0)));
    assert_eq!(chart.viewport().trans_x(), 0.0);
}

#[test]
fn test_pan_moves_visible_window() {
    let mut chart = line_chart(&ChartConfig::default());
    chart.zoom(4.0, 1.0, 0.0, 0.0);
    let before = chart.lowest_visible_x();
    ViewController::pan(&mut chart, DVec2::new(-100.0, 0.0));
    assert!(chart.lowest_visible_x() > before);
}

#[test]
fn test_scale_axis_selection() {
    let mut config = ChartConfig::default();
    let chart = line_chart(&config);
    assert_eq!(
        ViewController::scale_axis(&chart, DVec2::new(100.0, 10.0)),
        ScaleAxis::X
    );
    assert_eq!(
        ViewController::scale_axis(&chart, DVec2::new(10.0, 100.0)),
        ScaleAxis::Y
    );

    config.interaction.pinch_zoom = true;
    let chart = line_chart(&config);
    assert_eq!(
        ViewController::scale_axis(&chart, DVec2::new(10.0, 100.0)),
        ScaleAxis::Both
    );

    config.interaction.pinch_zoom = false;
    config.interaction.scale_y_enabled = false;
    let chart = line_chart(&config);
    assert_eq!(
        ViewController::scale_axis(&chart, DVec2::new(10.0, 100.0)),
        ScaleAxis::X
    );
}

#[test]
fn test_pinch_zoom_in_and_out() {
    let mut chart = line_chart(&ChartConfig::default());
    let center = chart.viewport().content_center();

    // fully zoomed out already
    assert!(!ViewController::pinch_zoom(&mut chart, 0.5, center, ScaleAxis::Both));

    assert!(ViewController::pinch_zoom(&mut chart, 1.5, center, ScaleAxis::X));
    assert!((chart.viewport().scale_x() - 1.5).abs() < 1e-9);
    assert_eq!(chart.viewport().scale_y(), 1.0);

    assert!(ViewController::pinch_zoom(&mut chart, 0.5, center, ScaleAxis::Both));
    assert_eq!(chart.viewport().scale_x(), 1.0);
    ViewController::end_pinch(&mut chart);
    assert!(chart.needs_redraw());
}

#[test]
fn test_wheel_zoom() {
    let mut chart = line_chart(&ChartConfig::default());
    let center = chart.viewport().content_center();
    ViewController::wheel_zoom(&mut chart, -100.0, center.x, center.y);
    assert!((chart.viewport().scale_x() - 2.0).abs() < 1e-9);
    ViewController::wheel_zoom(&mut chart, 100.0, center.x, center.y);
    assert!((chart.viewport().scale_x() - 1.0).abs() < 1e-9);
}

#[test]
fn test_release_starts_deceleration_only_when_draggable() {
    let chart = line_chart(&ChartConfig::default());
    assert!(ViewController::release(&chart, DVec2::new(-500.0, 0.0)).is_none());

    let mut chart = line_chart(&ChartConfig::default());
    chart.zoom(2.0, 1.0, 0.0, 0.0);
    assert!(ViewController::release(&chart, DVec2::new(-500.0, 0.0)).is_some());
    assert!(ViewController::release(&chart, DVec2::ZERO).is_none());

    let mut config = ChartConfig::default();
    config.interaction.drag_deceleration_enabled = false;
    let mut chart = line_chart(&config);
    chart.zoom(2.0, 1.0, 0.0, 0.0);
    assert!(ViewController::release(&chart, DVec2::new(-500.0, 0.0)).is_none());
}

#[test]
fn test_deceleration_decays_and_stops() {
    let mut chart = line_chart(&ChartConfig::default());
    chart.zoom(3.0, 1.0, 0.0, 0.0);
    let mut fling = Deceleration::new(DVec2::new(-1000.0, 0.0), 0.9);

    let mut ticks = 0;
    while fling.tick(&mut chart, Duration::from_millis(16)) {
        ticks += 1;
        assert!(ticks < 1000, "deceleration never finished");
    }
    assert!(!fling.is_active());
    assert!(chart.viewport().trans_x() < 0.0);
    // 1000 px/s decaying by 0.9 per 16 ms tick covers about 144 px
    assert!((chart.viewport().trans_x() + 144.0).abs() < 1.0);
}

#[test]
fn test_deceleration_stops_at_pan_limit() {
    let mut chart = line_chart(&ChartConfig::default());
    chart.zoom(2.0, 1.0, 0.0, 0.0);
    let mut fling = Deceleration::new(DVec2::new(1000.0, 0.0), 0.9);
    assert!(!fling.tick(&mut chart, Duration::from_millis(16)));
    assert_eq!(fling.velocity(), DVec2::ZERO);
}
