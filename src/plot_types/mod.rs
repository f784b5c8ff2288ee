// Data renderers, one module per series kind.

pub mod bar;
pub mod bubble;
pub mod buffers;
pub mod candlestick;
pub mod line;
pub mod scatter;

pub use buffers::ScratchBuffers;

use crate::bounds::VisibleXRange;
use crate::data_types::{AxisDependency, ChartData, Highlight, SeriesStyle};
use crate::rendering::Canvas;
use crate::transformer::Transformer;
use crate::viewport::ViewPortHandler;
use glam::DVec2;
use parking_lot::Mutex;
use tracing::trace;

/// Everything a renderer needs to project one frame.
pub struct RenderContext<'a> {
    pub viewport: &'a ViewPortHandler,
    pub left_transformer: &'a Transformer,
    pub right_transformer: &'a Transformer,
    pub left_inverted: bool,
    pub right_inverted: bool,
    pub visible: &'a dyn VisibleXRange,
    pub phase_x: f64,
    pub phase_y: f64,
    pub bar_width: f64,
    /// `(axis_minimum, axis_maximum)` of the left and right y axes.
    pub left_axis_extent: (f64, f64),
    pub right_axis_extent: (f64, f64),
}

impl RenderContext<'_> {
    pub fn transformer(&self, axis: AxisDependency) -> &Transformer {
        match axis {
            AxisDependency::Left => self.left_transformer,
            AxisDependency::Right => self.right_transformer,
        }
    }

    pub fn axis_extent(&self, axis: AxisDependency) -> (f64, f64) {
        match axis {
            AxisDependency::Left => self.left_axis_extent,
            AxisDependency::Right => self.right_axis_extent,
        }
    }

    pub fn is_inverted(&self, axis: AxisDependency) -> bool {
        match axis {
            AxisDependency::Left => self.left_inverted,
            AxisDependency::Right => self.right_inverted,
        }
    }
}

/// Draws every visible data set with the renderer its style selects.
#[derive(Default)]
pub struct DataRenderer {
    buffers: Mutex<ScratchBuffers>,
}

impl DataRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draw_data(&self, canvas: &mut dyn Canvas, data: &ChartData, ctx: &RenderContext) {
        let mut buffers = self.buffers.lock();
        for (index, set) in data.data_sets().iter().enumerate() {
            if !set.visible || set.is_empty() {
                continue;
            }
            trace!(index, entries = set.entry_count(), "drawing data set");
            match &set.style {
                SeriesStyle::Bar(style) => {
                    bar::draw_data_set(canvas, set, style, ctx, &mut buffers)
                }
                SeriesStyle::Line(style) => {
                    line::draw_data_set(canvas, set, style, ctx, &mut buffers)
                }
                SeriesStyle::Candle(style) => {
                    candlestick::draw_data_set(canvas, set, style, ctx, &mut buffers)
                }
                SeriesStyle::Bubble(style) => bubble::draw_data_set(canvas, set, style, ctx),
                SeriesStyle::Scatter(style) => {
                    scatter::draw_data_set(canvas, set, style, ctx, &mut buffers)
                }
            }
        }
    }

    pub fn draw_highlighted(
        &self,
        canvas: &mut dyn Canvas,
        data: &ChartData,
        ctx: &RenderContext,
        highlights: &[Highlight],
    ) {
        for highlight in highlights {
            let Some(set) = data.data_set(highlight.data_set_index) else {
                continue;
            };
            if !set.highlight_enabled {
                continue;
            }
            match &set.style {
                SeriesStyle::Bar(style) => bar::draw_highlight(canvas, set, style, ctx, highlight),
                SeriesStyle::Bubble(style) => {
                    bubble::draw_highlight(canvas, set, style, ctx, highlight)
                }
                other => draw_crosshair(canvas, ctx, highlight, other),
            }
        }
    }
}

/// Vertical and horizontal lines through a highlighted entry.
fn draw_crosshair(
    canvas: &mut dyn Canvas,
    ctx: &RenderContext,
    highlight: &Highlight,
    style: &SeriesStyle,
) {
    let vp = ctx.viewport;
    let p = ctx
        .transformer(highlight.axis)
        .pixel_for_values(vp, highlight.x, highlight.y * ctx.phase_y);
    if !vp.is_in_bounds(p.x, p.y) {
        return;
    }
    let segments = [
        (
            DVec2::new(p.x, vp.content_top()),
            DVec2::new(p.x, vp.content_bottom()),
        ),
        (
            DVec2::new(vp.content_left(), p.y),
            DVec2::new(vp.content_right(), p.y),
        ),
    ];
    canvas.stroke_segments(&segments, 1.0, style.highlight_color());
}

/// True when the segment lies completely on one outer side of the content
/// rect and cannot be visible.
pub(crate) fn segment_outside(vp: &ViewPortHandler, a: DVec2, b: DVec2) -> bool {
    (a.x < vp.content_left() && b.x < vp.content_left())
        || (a.x > vp.content_right() && b.x > vp.content_right())
        || (a.y < vp.content_top() && b.y < vp.content_top())
        || (a.y > vp.content_bottom() && b.y > vp.content_bottom())
}
