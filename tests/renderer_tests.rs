use gpui::Hsla;
use viewport_charts::data_types::{
    AxisDependency, BarStyle, BubbleStyle, CandleStyle, ChartData, DataSet, Entry, FillPosition,
    LineFill, LineMode, LineStyle, ScatterShape, ScatterStyle, SeriesStyle,
};
use glam::DVec2;
use viewport_charts::geometry::Rect;
use viewport_charts::plot_types::line::CURVE_STEPS;
use viewport_charts::rendering::DrawCommand;
use viewport_charts::{BarLineChart, RecordingCanvas};

fn chart_with(sets: Vec<DataSet>) -> BarLineChart {
    let mut chart = BarLineChart::new();
    chart.set_data(ChartData::new(sets));
    chart.set_dimensions(400.0, 300.0);
    chart
}

fn rects_with_color(canvas: &RecordingCanvas, color: Hsla) -> Vec<Rect> {
    canvas
        .commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Rect { rect, color: c } if *c == color => Some(*rect),
            _ => None,
        })
        .collect()
}

fn bar_set() -> DataSet {
    let entries = (0..5)
        .map(|i| Entry::new(i as f64, (i + 1) as f64 * 10.0))
        .collect();
    DataSet::new("bars", entries, SeriesStyle::Bar(BarStyle::default()))
}

#[test]
fn test_empty_chart_draws_background_only() {
    let mut chart = chart_with(Vec::new());
    let mut canvas = RecordingCanvas::new();
    chart.draw(&mut canvas);
    assert_eq!(canvas.commands.len(), 1);
    assert!(!chart.needs_redraw());
}

#[test]
fn test_bars_stand_on_zero_line() {
    let mut chart = chart_with(vec![bar_set()]);
    let mut canvas = RecordingCanvas::new();
    chart.draw(&mut canvas);

    let bars = rects_with_color(&canvas, gpui::blue());
    assert_eq!(bars.len(), 5);

    let zero = chart.pixel_for_values(0.0, 0.0, AxisDependency::Left).y;
    for (i, bar) in bars.iter().enumerate() {
        assert!((bar.bottom() - zero).abs() < 1e-6);
        let top = chart
            .pixel_for_values(i as f64, (i + 1) as f64 * 10.0, AxisDependency::Left)
            .y;
        assert!((bar.top() - top).abs() < 1e-6);

        let center = chart.pixel_for_values(i as f64, 0.0, AxisDependency::Left).x;
        assert!((bar.center().x - center).abs() < 1e-6);
    }

    // taller values give taller bars
    assert!(bars[4].height > bars[0].height);
    assert!(canvas.texts().count() > 0);
}

#[test]
fn test_x_phase_limits_bar_count() {
    let mut chart = chart_with(vec![bar_set()]);
    chart.animator_mut().set_phase_x(0.3);
    let mut canvas = RecordingCanvas::new();
    chart.draw(&mut canvas);
    assert_eq!(rects_with_color(&canvas, gpui::blue()).len(), 2);
}

#[test]
fn test_stacked_bars_use_segment_colors() {
    let style = BarStyle {
        colors: vec![gpui::red(), gpui::green()],
        ..BarStyle::default()
    };
    let entries = (0..3)
        .map(|i| Entry::stacked(i as f64, vec![10.0, 20.0]))
        .collect();
    let mut chart = chart_with(vec![DataSet::new("stacks", entries, SeriesStyle::Bar(style))]);
    let mut canvas = RecordingCanvas::new();
    chart.draw(&mut canvas);

    let lower = rects_with_color(&canvas, gpui::red());
    let upper = rects_with_color(&canvas, gpui::green());
    assert_eq!(lower.len(), 3);
    assert_eq!(upper.len(), 3);
    for (lo, hi) in lower.iter().zip(&upper) {
        assert!((lo.top() - hi.bottom()).abs() < 1e-6);
    }
}

#[test]
fn test_bar_highlight_is_drawn() {
    let mut chart = chart_with(vec![bar_set()]);
    let style = BarStyle::default();
    chart.highlight_value(2.0, f64::NAN, 0);
    let mut canvas = RecordingCanvas::new();
    chart.draw(&mut canvas);
    assert_eq!(rects_with_color(&canvas, style.highlight_color).len(), 1);
}

#[test]
fn test_line_draws_one_segment_per_gap() {
    let style = LineStyle {
        color: gpui::red(),
        line_width: 3.0,
        ..LineStyle::default()
    };
    let entries = vec![
        Entry::new(0.0, 1.0),
        Entry::new(1.0, 4.0),
        Entry::new(2.0, 2.0),
        Entry::new(3.0, 5.0),
    ];
    let mut chart = chart_with(vec![DataSet::new("line", entries, SeriesStyle::Line(style))]);
    let mut canvas = RecordingCanvas::new();
    chart.draw(&mut canvas);

    let segments: Vec<_> = canvas
        .commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Segments {
                segments, width, ..
            } if *width == 3.0 => Some(segments.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(segments.len(), 1);
    let segments = &segments[0];
    assert_eq!(segments.len(), 3);

    let first = chart.pixel_for_values(0.0, 1.0, AxisDependency::Left);
    assert!((segments[0].0 - first).length() < 1e-6);
    for pair in segments.windows(2) {
        assert!((pair[0].1 - pair[1].0).length() < 1e-9);
    }
}

#[test]
fn test_candles_colored_by_direction() {
    let style = CandleStyle::default();
    let entries = vec![
        Entry::candle(0.0, 10.0, 15.0, 8.0, 14.0),
        Entry::candle(1.0, 14.0, 16.0, 9.0, 11.0),
    ];
    let mut chart = chart_with(vec![DataSet::new(
        "candles",
        entries,
        SeriesStyle::Candle(style.clone()),
    )]);
    let mut canvas = RecordingCanvas::new();
    chart.draw(&mut canvas);

    let rising = rects_with_color(&canvas, style.increasing_color);
    let falling = rects_with_color(&canvas, style.decreasing_color);
    assert_eq!(rising.len(), 1);
    assert_eq!(falling.len(), 1);

    let open = chart.pixel_for_values(0.0, 10.0, AxisDependency::Left).y;
    let close = chart.pixel_for_values(0.0, 14.0, AxisDependency::Left).y;
    assert!((rising[0].bottom() - open).abs() < 1e-6);
    assert!((rising[0].top() - close).abs() < 1e-6);
}

#[test]
fn test_hidden_sets_are_not_drawn() {
    let mut set = bar_set();
    set.visible = false;
    let mut chart = chart_with(vec![set]);
    let mut canvas = RecordingCanvas::new();
    chart.draw(&mut canvas);
    assert!(rects_with_color(&canvas, gpui::blue()).is_empty());
}

fn circles(canvas: &RecordingCanvas) -> Vec<(glam::DVec2, f64)> {
    canvas
        .commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Circle {
                center,
                radius,
                stroke: None,
                ..
            } => Some((*center, *radius)),
            _ => None,
        })
        .collect()
}

#[test]
fn test_bubble_area_follows_size() {
    let entries = vec![
        Entry::bubble(0.0, 5.0, 1.0),
        Entry::bubble(1.0, 5.0, 4.0),
        Entry::bubble(2.0, 5.0, 9.0),
    ];
    let mut chart = chart_with(vec![DataSet::new(
        "bubbles",
        entries,
        SeriesStyle::Bubble(BubbleStyle::default()),
    )]);
    let mut canvas = RecordingCanvas::new();
    chart.draw(&mut canvas);

    let drawn = circles(&canvas);
    assert_eq!(drawn.len(), 3);
    assert!((drawn[1].1 / drawn[0].1 - 2.0).abs() < 1e-9);
    assert!((drawn[2].1 / drawn[0].1 - 3.0).abs() < 1e-9);
}

#[test]
fn test_scatter_draws_one_shape_per_entry() {
    let style = ScatterStyle {
        shape: ScatterShape::Circle,
        ..ScatterStyle::default()
    };
    let entries = (0..6).map(|i| Entry::new(i as f64, i as f64)).collect();
    let mut chart = chart_with(vec![DataSet::new("dots", entries, SeriesStyle::Scatter(style))]);
    let mut canvas = RecordingCanvas::new();
    chart.draw(&mut canvas);

    let drawn = circles(&canvas);
    assert_eq!(drawn.len(), 6);
    let p = chart.pixel_for_values(3.0, 3.0, AxisDependency::Left);
    assert!((drawn[3].0 - p).length() < 1e-6);
}

fn zigzag_line(style: LineStyle) -> BarLineChart {
    let entries = vec![
        Entry::new(0.0, 1.0),
        Entry::new(1.0, 4.0),
        Entry::new(2.0, 2.0),
        Entry::new(3.0, 5.0),
    ];
    chart_with(vec![DataSet::new("line", entries, SeriesStyle::Line(style))])
}

fn polygons(canvas: &RecordingCanvas) -> Vec<(Vec<DVec2>, Hsla)> {
    canvas
        .commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Polygon { points, color } => Some((points.clone(), *color)),
            _ => None,
        })
        .collect()
}

fn polylines(canvas: &RecordingCanvas, width: f32) -> Vec<Vec<DVec2>> {
    canvas
        .commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Polyline { points, width: w, .. } if *w == width => Some(points.clone()),
            _ => None,
        })
        .collect()
}

fn assert_near(a: DVec2, b: DVec2) {
    assert!(a.distance(b) < 1e-6, "{a} vs {b}");
}

#[test]
fn test_line_fill_closes_against_axis_minimum() {
    let fill = LineFill {
        color: gpui::red(),
        alpha: 0.5,
        position: FillPosition::Auto,
    };
    let mut chart = zigzag_line(LineStyle {
        line_width: 3.0,
        fill: Some(fill),
        ..LineStyle::default()
    });
    let mut canvas = RecordingCanvas::new();
    chart.draw(&mut canvas);

    let fills = polygons(&canvas);
    assert_eq!(fills.len(), 1);
    let (points, color) = &fills[0];
    assert_eq!(points.len(), 4 + 2);
    assert!((color.a - 0.5).abs() < 1e-6);

    let bottom = chart.viewport().content_bottom();
    assert!((points[4].y - bottom).abs() < 1e-6);
    assert!((points[5].y - bottom).abs() < 1e-6);
    assert_near(points[0], chart.pixel_for_values(0.0, 1.0, AxisDependency::Left));
    assert!((points[5].x - points[0].x).abs() < 1e-6);

    // area first, stroke on top
    let fill_at = canvas
        .commands
        .iter()
        .position(|c| matches!(c, DrawCommand::Polygon { .. }));
    let stroke_at = canvas
        .commands
        .iter()
        .position(|c| matches!(c, DrawCommand::Segments { width, .. } if *width == 3.0));
    assert!(fill_at.unwrap() < stroke_at.unwrap());
}

#[test]
fn test_line_fill_to_fixed_value() {
    let fill = LineFill {
        position: FillPosition::Value(2.0),
        ..LineFill::default()
    };
    let mut chart = zigzag_line(LineStyle {
        fill: Some(fill),
        ..LineStyle::default()
    });
    let mut canvas = RecordingCanvas::new();
    chart.draw(&mut canvas);

    let base = chart.pixel_for_values(0.0, 2.0, AxisDependency::Left).y;
    let fills = polygons(&canvas);
    let points = &fills[0].0;
    assert!((points[points.len() - 1].y - base).abs() < 1e-6);
    assert!((points[points.len() - 2].y - base).abs() < 1e-6);
}

#[test]
fn test_cubic_bezier_passes_through_end_entries() {
    let entries = vec![Entry::new(0.0, 1.0), Entry::new(1.0, 4.0), Entry::new(2.0, 2.0)];
    let style = LineStyle {
        mode: LineMode::CubicBezier,
        line_width: 3.0,
        ..LineStyle::default()
    };
    let mut chart = chart_with(vec![DataSet::new("curve", entries, SeriesStyle::Line(style))]);
    let mut canvas = RecordingCanvas::new();
    chart.draw(&mut canvas);

    let paths = polylines(&canvas, 3.0);
    assert_eq!(paths.len(), 1);
    let path = &paths[0];
    assert_eq!(path.len(), 1 + 2 * CURVE_STEPS);
    assert_near(path[0], chart.pixel_for_values(0.0, 1.0, AxisDependency::Left));
    assert_near(path[CURVE_STEPS], chart.pixel_for_values(1.0, 4.0, AxisDependency::Left));
    assert_near(path[2 * CURVE_STEPS], chart.pixel_for_values(2.0, 2.0, AxisDependency::Left));
}

#[test]
fn test_horizontal_bezier_crosses_midpoints() {
    let entries = vec![Entry::new(0.0, 1.0), Entry::new(1.0, 4.0), Entry::new(2.0, 2.0)];
    let style = LineStyle {
        mode: LineMode::HorizontalBezier,
        line_width: 3.0,
        fill: Some(LineFill::default()),
        ..LineStyle::default()
    };
    let mut chart = chart_with(vec![DataSet::new("curve", entries, SeriesStyle::Line(style))]);
    let mut canvas = RecordingCanvas::new();
    chart.draw(&mut canvas);

    let paths = polylines(&canvas, 3.0);
    assert_eq!(paths.len(), 1);
    let path = &paths[0];
    assert_eq!(path.len(), 1 + 2 * CURVE_STEPS);

    let a = chart.pixel_for_values(0.0, 1.0, AxisDependency::Left);
    let b = chart.pixel_for_values(1.0, 4.0, AxisDependency::Left);
    assert_near(path[CURVE_STEPS / 2], (a + b) / 2.0);
    assert_near(path[CURVE_STEPS], b);

    // the fill follows the flattened curve
    let fills = polygons(&canvas);
    assert_eq!(fills.len(), 1);
    assert_eq!(fills[0].0.len(), path.len() + 2);
}
