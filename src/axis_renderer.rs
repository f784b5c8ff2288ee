use crate::axis_values::{compute_axis_values, IntervalVariant};
use crate::data_types::{AxisBase, AxisEdge, XAxis, XAxisPosition, YAxis};
use crate::rendering::{Canvas, TextAnchor};
use crate::theme::ChartTheme;
use crate::transformer::Transformer;
use crate::utils::PixelsExt;
use crate::viewport::ViewPortHandler;
use glam::DVec2;
use tracing::trace;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisOrientation {
    /// Y axes, values grow upwards.
    Vertical,
    Horizontal,
}

pub struct AxisRenderer;

impl AxisRenderer {
    /// Extent to place labels in. While zoomed in on the axis the data
    /// values at the content rect corners replace `min`/`max`.
    pub fn visible_axis_range(
        viewport: &ViewPortHandler,
        transformer: &Transformer,
        min: f64,
        max: f64,
        inverted: bool,
        orientation: AxisOrientation,
    ) -> (f64, f64) {
        let zoomed_out = match orientation {
            AxisOrientation::Vertical => viewport.is_fully_zoomed_out_y(),
            AxisOrientation::Horizontal => viewport.is_fully_zoomed_out_x(),
        };
        if viewport.content_width() <= 10.0 || zoomed_out {
            return (min, max);
        }

        let top_left = DVec2::new(viewport.content_left(), viewport.content_top());
        match orientation {
            AxisOrientation::Vertical => {
                let p1 = transformer.value_for_touch_point(viewport, top_left);
                let p2 = transformer.value_for_touch_point(
                    viewport,
                    DVec2::new(viewport.content_left(), viewport.content_bottom()),
                );
                if inverted {
                    (p1.y, p2.y)
                } else {
                    (p2.y, p1.y)
                }
            }
            AxisOrientation::Horizontal => {
                let p1 = transformer.value_for_touch_point(viewport, top_left);
                let p2 = transformer.value_for_touch_point(
                    viewport,
                    DVec2::new(viewport.content_right(), viewport.content_top()),
                );
                if inverted {
                    (p2.x, p1.x)
                } else {
                    (p1.x, p2.x)
                }
            }
        }
    }

    /// Recomputes the label entries of `axis` for the current viewport.
    #[allow(clippy::too_many_arguments)]
    pub fn compute_axis(
        axis: &mut AxisBase,
        viewport: &ViewPortHandler,
        transformer: &Transformer,
        min: f64,
        max: f64,
        inverted: bool,
        orientation: AxisOrientation,
        variant: IntervalVariant,
    ) {
        let (min, max) =
            Self::visible_axis_range(viewport, transformer, min, max, inverted, orientation);
        let values = compute_axis_values(min, max, &axis.interval_params(), variant);
        trace!(
            ?orientation,
            min,
            max,
            entries = values.entries.len(),
            "computed axis values"
        );
        axis.apply_values(values);
    }

    pub fn render_x_axis(
        canvas: &mut dyn Canvas,
        axis: &XAxis,
        viewport: &ViewPortHandler,
        transformer: &Transformer,
        theme: &ChartTheme,
    ) {
        let base = &axis.base;
        if !base.enabled {
            return;
        }

        if base.draw_grid_lines {
            let segments: Vec<(DVec2, DVec2)> = base
                .entries
                .iter()
                .map(|v| transformer.pixel_for_values(viewport, *v, 0.0).x)
                .filter(|x| viewport.is_in_bounds_x(*x))
                .map(|x| {
                    (
                        DVec2::new(x, viewport.content_top()),
                        DVec2::new(x, viewport.content_bottom()),
                    )
                })
                .collect();
            canvas.stroke_segments(&segments, theme.grid_line_width, theme.grid_line);
        }

        let edges: &[AxisEdge] = match axis.position {
            XAxisPosition::Top => &[AxisEdge::Top],
            XAxisPosition::Bottom => &[AxisEdge::Bottom],
            XAxisPosition::BothSided => &[AxisEdge::Top, AxisEdge::Bottom],
        };

        for &edge in edges {
            if base.draw_axis_line {
                Self::render_axis_line(canvas, edge, viewport, theme);
            }
            if base.draw_labels {
                Self::render_x_labels(canvas, axis, edge, viewport, transformer, theme);
            }
        }
    }

    fn render_x_labels(
        canvas: &mut dyn Canvas,
        axis: &XAxis,
        edge: AxisEdge,
        viewport: &ViewPortHandler,
        transformer: &Transformer,
        theme: &ChartTheme,
    ) {
        let base = &axis.base;
        let font_size = theme.axis_label_size.as_f32();
        let offset = theme.label_offset.as_f64() + font_size as f64 / 2.0;
        let y = match edge {
            AxisEdge::Top => viewport.content_top() - offset,
            _ => viewport.content_bottom() + offset,
        };

        let positions = base.label_positions();
        let last = positions.len().saturating_sub(1);
        for (i, value) in positions.iter().enumerate() {
            let mut x = transformer.pixel_for_values(viewport, *value, 0.0).x;
            if !viewport.is_in_bounds_x(x) {
                continue;
            }

            let label = base.formatted_label(*value);
            if axis.avoid_first_last_clipping && (i == 0 || i == last) {
                let half = canvas.measure_text(&label, font_size) / 2.0;
                if i == last && last != 0 && x + half > viewport.chart_width() {
                    x = viewport.chart_width() - half;
                } else if i == 0 && x - half < 0.0 {
                    x = half;
                }
            }

            canvas.draw_text(
                &label,
                DVec2::new(x, y),
                TextAnchor::Center,
                font_size,
                theme.axis_label,
            );
        }
    }

    pub fn render_y_axis(
        canvas: &mut dyn Canvas,
        axis: &YAxis,
        viewport: &ViewPortHandler,
        transformer: &Transformer,
        theme: &ChartTheme,
    ) {
        let base = &axis.base;
        if !base.enabled {
            return;
        }
        let edge = AxisEdge::from(axis.dependency);

        if base.draw_grid_lines {
            let segments: Vec<(DVec2, DVec2)> = base
                .entries
                .iter()
                .map(|v| transformer.pixel_for_values(viewport, 0.0, *v).y)
                .filter(|y| viewport.is_in_bounds_y(*y))
                .map(|y| {
                    (
                        DVec2::new(viewport.content_left(), y),
                        DVec2::new(viewport.content_right(), y),
                    )
                })
                .collect();
            canvas.stroke_segments(&segments, theme.grid_line_width, theme.grid_line);
        }

        if base.draw_axis_line {
            Self::render_axis_line(canvas, edge, viewport, theme);
        }

        if base.draw_labels {
            let font_size = theme.axis_label_size.as_f32();
            let offset = theme.label_offset.as_f64();
            let (x, anchor) = match edge {
                AxisEdge::Right => (viewport.content_right() + offset, TextAnchor::Left),
                _ => (viewport.content_left() - offset, TextAnchor::Right),
            };

            for value in base.label_positions() {
                let y = transformer.pixel_for_values(viewport, 0.0, *value).y;
                if !viewport.is_in_bounds_y(y) {
                    continue;
                }
                canvas.draw_text(
                    &base.formatted_label(*value),
                    DVec2::new(x, y),
                    anchor,
                    font_size,
                    theme.axis_label,
                );
            }
        }
    }

    fn render_axis_line(
        canvas: &mut dyn Canvas,
        edge: AxisEdge,
        viewport: &ViewPortHandler,
        theme: &ChartTheme,
    ) {
        let (left, right) = (viewport.content_left(), viewport.content_right());
        let (top, bottom) = (viewport.content_top(), viewport.content_bottom());
        let segment = match edge {
            AxisEdge::Left => (DVec2::new(left, top), DVec2::new(left, bottom)),
            AxisEdge::Right => (DVec2::new(right, top), DVec2::new(right, bottom)),
            AxisEdge::Top => (DVec2::new(left, top), DVec2::new(right, top)),
            AxisEdge::Bottom => (DVec2::new(left, bottom), DVec2::new(right, bottom)),
        };
        canvas.stroke_segments(&[segment], theme.axis_line_width, theme.axis_line);
    }
}
