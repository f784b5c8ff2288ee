use super::buffers::{bar_rect, feed_bar_buffer, ScratchBuffers};
use super::RenderContext;
use crate::data_types::{BarStyle, DataSet, Highlight};
use crate::geometry::Rect;
use crate::rendering::Canvas;
use crate::transformer::transform_rect;

/// Draws plain and stacked bars. Bars left of the content rect are skipped,
/// drawing stops at the first bar right of it.
pub fn draw_data_set(
    canvas: &mut dyn Canvas,
    set: &DataSet,
    style: &BarStyle,
    ctx: &RenderContext,
    buffers: &mut ScratchBuffers,
) {
    let vp = ctx.viewport;
    let trans = ctx.transformer(set.axis_dependency);
    let matrix = trans.value_to_pixel_matrix(vp);
    let stacked = set.is_stacked();

    if style.draw_bar_shadow {
        draw_shadows(canvas, set, style, ctx);
    }

    feed_bar_buffer(
        set,
        ctx.bar_width,
        ctx.phase_x,
        ctx.phase_y,
        ctx.is_inverted(set.axis_dependency),
        &mut buffers.bars,
    );

    for bar in &buffers.bars {
        let rect = transform_rect(&matrix, &bar.rect).standardized();

        if !vp.is_in_bounds_left(rect.right()) {
            continue;
        }
        if !vp.is_in_bounds_right(rect.left()) {
            break;
        }

        let color = if stacked {
            style.color_at(bar.stack_index)
        } else {
            style.color_at(bar.entry_index)
        };
        canvas.fill_rect(rect, color);
    }
}

/// Full-height background behind every visible bar.
fn draw_shadows(canvas: &mut dyn Canvas, set: &DataSet, style: &BarStyle, ctx: &RenderContext) {
    let vp = ctx.viewport;
    let trans = ctx.transformer(set.axis_dependency);
    let half = ctx.bar_width / 2.0;
    let count = set.entry_count();
    let limit = ((count as f64 * ctx.phase_x.clamp(0.0, 1.0)).ceil() as usize).min(count);

    for entry in set.entries().iter().take(limit) {
        let left = trans.pixel_for_values(vp, entry.x - half, 0.0).x;
        let right = trans.pixel_for_values(vp, entry.x + half, 0.0).x;
        let (left, right) = (left.min(right), left.max(right));

        if !vp.is_in_bounds_left(right) {
            continue;
        }
        if !vp.is_in_bounds_right(left) {
            break;
        }

        let rect = Rect::new(
            left,
            vp.content_top(),
            right - left,
            vp.content_height(),
        );
        canvas.fill_rect(rect, style.shadow_color);
    }
}

/// Highlights the touched bar, or only the touched segment of a stack.
pub fn draw_highlight(
    canvas: &mut dyn Canvas,
    set: &DataSet,
    style: &BarStyle,
    ctx: &RenderContext,
    highlight: &Highlight,
) {
    let Some(entry) = set.entries_for_x_value(highlight.x).into_iter().next() else {
        return;
    };

    let (from, to) = match highlight.stack_index {
        Some(index) if set.is_stacked() => match entry.stack_ranges().get(index) {
            Some(&(from, to)) => (from, to),
            None => return,
        },
        _ => (entry.y, 0.0),
    };

    let vp = ctx.viewport;
    let trans = ctx.transformer(set.axis_dependency);
    let mut rect = bar_rect(entry.x, ctx.bar_width, from, to);
    trans.rect_value_to_pixel_with_phase(vp, &mut rect, ctx.phase_y);

    canvas.fill_rect(rect.standardized(), style.highlight_color);
}
