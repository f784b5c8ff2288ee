use glam::DVec2;
use gpui::Hsla;
use viewport_charts::data_types::{
    BarStyle, CandleStyle, ChartData, DataSet, Entry, LineStyle, SeriesStyle,
};
use viewport_charts::geometry::Rect;
use viewport_charts::legend::{
    Legend, LegendConfig, LegendDirection, LegendEntry, LegendForm, LegendHorizontalAlignment,
    LegendOrientation, LegendRenderer,
};
use viewport_charts::rendering::{DrawCommand, TextAnchor};
use viewport_charts::theme::ChartTheme;
use viewport_charts::{BarLineChart, RecordingCanvas, ViewPortHandler};

fn enabled() -> LegendConfig {
    LegendConfig {
        enabled: true,
        ..LegendConfig::default()
    }
}

fn labelled(labels: &[&str]) -> Vec<LegendEntry> {
    labels
        .iter()
        .map(|l| LegendEntry::new(Some(l.to_string()), Some(gpui::red())))
        .collect()
}

fn measured(config: LegendConfig, entries: Vec<LegendEntry>, vp: &ViewPortHandler) -> Legend {
    let mut legend = Legend::new(config);
    legend.set_custom(entries);
    legend.calculate_dimensions(vp);
    legend
}

fn render(legend: &Legend, vp: &ViewPortHandler) -> RecordingCanvas {
    let mut canvas = RecordingCanvas::new();
    LegendRenderer::render(&mut canvas, legend, vp, &ChartTheme::default());
    canvas
}

fn rects(canvas: &RecordingCanvas) -> Vec<(Rect, Hsla)> {
    canvas
        .commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Rect { rect, color } => Some((*rect, *color)),
            _ => None,
        })
        .collect()
}

fn texts(canvas: &RecordingCanvas) -> Vec<(String, DVec2)> {
    canvas
        .commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Text {
                text,
                origin,
                anchor: TextAnchor::Left,
                ..
            } => Some((text.clone(), *origin)),
            _ => None,
        })
        .collect()
}

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} vs {b}");
}

#[test]
fn test_entries_follow_set_kinds() {
    let line = DataSet::new(
        "a",
        vec![Entry::new(0.0, 1.0)],
        SeriesStyle::Line(LineStyle {
            color: gpui::red(),
            ..LineStyle::default()
        }),
    );
    let bars = DataSet::new(
        "b",
        vec![Entry::new(0.0, 1.0), Entry::new(1.0, 2.0)],
        SeriesStyle::Bar(BarStyle::default()),
    );
    let candle_style = CandleStyle::default();
    let candles = DataSet::new(
        "c",
        vec![Entry::candle(0.0, 1.0, 2.0, 0.5, 1.5)],
        SeriesStyle::Candle(candle_style.clone()),
    );
    let stacks = DataSet::new(
        "s",
        vec![Entry::stacked(0.0, vec![1.0, 2.0])],
        SeriesStyle::Bar(BarStyle {
            colors: vec![gpui::red(), gpui::green()],
            stack_labels: vec!["lo".into(), "hi".into()],
            ..BarStyle::default()
        }),
    );
    let data = ChartData::new(vec![line, bars, candles, stacks]);

    let mut legend = Legend::new(enabled());
    legend.compute(&data, &ViewPortHandler::new(400.0, 300.0));
    let labels: Vec<Option<&str>> = legend.entries().iter().map(|e| e.label.as_deref()).collect();
    assert_eq!(
        labels,
        vec![Some("a"), Some("b"), None, Some("c"), Some("lo"), Some("hi"), Some("s")]
    );

    let entries = legend.entries();
    assert_eq!(entries[0].form_color, Some(gpui::red()));
    assert_eq!(entries[2].form_color, Some(candle_style.decreasing_color));
    assert_eq!(entries[3].form_color, Some(candle_style.increasing_color));
    assert_eq!(entries[5].form_color, Some(gpui::green()));
    assert_eq!(entries[6].form, LegendForm::None);
    assert_eq!(entries[6].form_color, None);
}

#[test]
fn test_multi_color_set_labels_last_color_only() {
    let style = BarStyle {
        colors: vec![gpui::red(), gpui::green(), gpui::blue()],
        ..BarStyle::default()
    };
    let entries = (0..5).map(|i| Entry::new(i as f64, 1.0)).collect();
    let wide = DataSet::new("multi", entries, SeriesStyle::Bar(style.clone()));
    let short = DataSet::new(
        "short",
        vec![Entry::new(0.0, 1.0), Entry::new(1.0, 1.0)],
        SeriesStyle::Bar(style),
    );

    let mut legend = Legend::new(enabled());
    legend.compute(&ChartData::new(vec![wide, short]), &ViewPortHandler::new(400.0, 300.0));
    let labels: Vec<Option<&str>> = legend.entries().iter().map(|e| e.label.as_deref()).collect();
    assert_eq!(labels, vec![None, None, Some("multi"), None, Some("short")]);
    assert_eq!(legend.entries()[4].form_color, Some(gpui::green()));
}

#[test]
fn test_custom_entries_survive_recompute() {
    let data = ChartData::new(vec![DataSet::new(
        "set",
        vec![Entry::new(0.0, 1.0)],
        SeriesStyle::Line(LineStyle::default()),
    )]);
    let vp = ViewPortHandler::new(400.0, 300.0);

    let mut legend = Legend::new(enabled());
    legend.extra_entries = labelled(&["extra"]);
    legend.compute(&data, &vp);
    assert_eq!(legend.entries().len(), 2);
    assert_eq!(legend.entries()[1].label.as_deref(), Some("extra"));

    legend.set_custom(labelled(&["x", "y", "z"]));
    legend.compute(&data, &vp);
    assert_eq!(legend.entries().len(), 3);

    legend.reset_custom();
    legend.compute(&data, &vp);
    assert_eq!(legend.entries().len(), 2);
}

#[test]
fn test_horizontal_single_entry_size() {
    let vp = ViewPortHandler::new(200.0, 100.0);
    let legend = measured(enabled(), labelled(&["abc"]), &vp);
    // form 8, form-to-text 5, three glyphs of 6
    assert_close(legend.needed_width(), 31.0 + 5.0);
    assert_close(legend.needed_height(), 10.0 + 3.0);
    assert_eq!(legend.line_widths().len(), 1);
}

#[test]
fn test_horizontal_legend_wraps_to_content_width() {
    let vp = ViewPortHandler::new(100.0, 100.0);
    let entries = labelled(&["abcd", "abcd", "abcd", "abcd"]);

    let legend = measured(enabled(), entries.clone(), &vp);
    assert_eq!(legend.break_points(), &[false, false, true, false]);
    assert_eq!(legend.line_widths().len(), 2);
    for width in legend.line_widths() {
        assert_close(*width, 80.0);
    }
    assert_close(legend.needed_width(), 85.0);
    assert_close(legend.needed_height(), 23.0);

    let config = LegendConfig {
        word_wrap: false,
        ..enabled()
    };
    let legend = measured(config, entries, &vp);
    assert_eq!(legend.line_widths().len(), 1);
    assert_close(legend.needed_width(), 4.0 * 37.0 + 3.0 * 6.0 + 5.0);
}

#[test]
fn test_vertical_legend_stacks_lines() {
    let vp = ViewPortHandler::new(200.0, 100.0);
    let config = LegendConfig {
        orientation: LegendOrientation::Vertical,
        ..enabled()
    };
    let legend = measured(config.clone(), labelled(&["abc", "abcd"]), &vp);
    assert_close(legend.needed_width(), 37.0 + 5.0);
    assert_close(legend.needed_height(), 20.0 + 3.0);

    // a stacked group's caption takes its own line below the forms
    let group = vec![
        LegendEntry::new(None, Some(gpui::red())),
        LegendEntry::new(None, Some(gpui::green())),
        LegendEntry {
            form: LegendForm::None,
            ..LegendEntry::new(Some("s".into()), None)
        },
    ];
    let legend = measured(config, group, &vp);
    assert_close(legend.needed_height(), 20.0 + 3.0);
}

#[test]
fn test_horizontal_render_positions() {
    let vp = ViewPortHandler::new(200.0, 100.0);
    let legend = measured(enabled(), labelled(&["abcd"]), &vp);
    let canvas = render(&legend, &vp);

    assert_eq!(rects(&canvas), vec![(Rect::new(5.0, 85.0, 8.0, 8.0), gpui::red())]);
    let texts = texts(&canvas);
    assert_eq!(texts.len(), 1);
    assert_eq!(texts[0].0, "abcd");
    assert_close(texts[0].1.x, 18.0);
    assert_close(texts[0].1.y, 89.0);
}

#[test]
fn test_right_to_left_render_mirrors_entry() {
    let vp = ViewPortHandler::new(200.0, 100.0);
    let config = LegendConfig {
        direction: LegendDirection::RightToLeft,
        ..enabled()
    };
    let legend = measured(config, labelled(&["abcd"]), &vp);
    let canvas = render(&legend, &vp);

    // origin moves right by the needed width
    assert_eq!(rects(&canvas)[0].0, Rect::new(39.0, 85.0, 8.0, 8.0));
    assert_close(texts(&canvas)[0].1.x, 10.0);
}

#[test]
fn test_centered_line_is_shifted_by_half_its_width() {
    let vp = ViewPortHandler::new(200.0, 100.0);
    let config = LegendConfig {
        horizontal_alignment: LegendHorizontalAlignment::Center,
        ..enabled()
    };
    let legend = measured(config, labelled(&["abcd"]), &vp);
    let canvas = render(&legend, &vp);
    assert_close(rects(&canvas)[0].0.x, 105.0 - 37.0 / 2.0);
}

#[test]
fn test_vertical_render_positions() {
    let vp = ViewPortHandler::new(200.0, 100.0);
    let config = LegendConfig {
        orientation: LegendOrientation::Vertical,
        horizontal_alignment: LegendHorizontalAlignment::Right,
        ..enabled()
    };
    let legend = measured(config, labelled(&["abc", "abcd"]), &vp);
    let canvas = render(&legend, &vp);

    let rects: Vec<Rect> = rects(&canvas).into_iter().map(|(r, _)| r).collect();
    assert_eq!(
        rects,
        vec![Rect::new(153.0, 75.0, 8.0, 8.0), Rect::new(153.0, 85.0, 8.0, 8.0)]
    );
    let texts = texts(&canvas);
    assert_close(texts[0].1.x, 166.0);
    assert_close(texts[0].1.y, 79.0);
    assert_close(texts[1].1.y, 89.0);
}

#[test]
fn test_forms_and_skipped_colors() {
    let vp = ViewPortHandler::new(200.0, 100.0);

    let config = LegendConfig {
        form: LegendForm::Circle,
        ..enabled()
    };
    let canvas = render(&measured(config, labelled(&["abcd"]), &vp), &vp);
    let circles: Vec<_> = canvas
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
        .collect();
    assert_eq!(circles, vec![(DVec2::new(9.0, 89.0), 4.0)]);

    let line = vec![LegendEntry {
        form: LegendForm::Line,
        ..LegendEntry::new(Some("abcd".into()), Some(gpui::red()))
    }];
    let canvas = render(&measured(enabled(), line, &vp), &vp);
    let segments: Vec<_> = canvas
        .commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Segments { segments, width, .. } => Some((segments.clone(), *width)),
            _ => None,
        })
        .collect();
    assert_eq!(
        segments,
        vec![(vec![(DVec2::new(5.0, 89.0), DVec2::new(13.0, 89.0))], 3.0)]
    );

    let clear = vec![LegendEntry::new(Some("abcd".into()), Some(gpui::red().alpha(0.0)))];
    let canvas = render(&measured(enabled(), clear, &vp), &vp);
    assert!(rects(&canvas).is_empty());
    assert_eq!(texts(&canvas).len(), 1);
}

#[test]
fn test_disabled_legend_draws_nothing() {
    let vp = ViewPortHandler::new(200.0, 100.0);
    let legend = measured(LegendConfig::default(), labelled(&["abcd"]), &vp);
    assert!(render(&legend, &vp).commands.is_empty());
}

#[test]
fn test_chart_draws_legend_for_its_sets() {
    let style = LineStyle {
        color: gpui::green(),
        ..LineStyle::default()
    };
    let entries = (0..5).map(|i| Entry::new(i as f64, i as f64)).collect();
    let mut chart = BarLineChart::new();
    chart.legend.config.enabled = true;
    chart.set_data(ChartData::new(vec![DataSet::new(
        "series",
        entries,
        SeriesStyle::Line(style),
    )]));
    chart.set_dimensions(400.0, 300.0);

    let mut canvas = RecordingCanvas::new();
    chart.draw(&mut canvas);
    assert!(canvas.texts().any(|t| t == "series"));
    let forms: Vec<Rect> = rects(&canvas)
        .into_iter()
        .filter(|(_, color)| *color == gpui::green())
        .map(|(r, _)| r)
        .collect();
    assert_eq!(forms.len(), 1);
    assert_close(forms[0].width, 8.0);
    // the legend sits below the content rect
    assert!(forms[0].y > chart.viewport().content_bottom());
}
