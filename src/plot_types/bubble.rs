use super::RenderContext;
use crate::bounds::XBounds;
use crate::data_types::{BubbleStyle, DataSet, Highlight};
use crate::rendering::Canvas;

/// Bubble diameter in pixels. Normalised sizes scale with the square root of
/// the size ratio so the bubble area is proportional to the size.
pub fn shape_size(entry_size: f64, max_size: f64, reference: f64, normalize: bool) -> f64 {
    let factor = if normalize {
        if max_size == 0.0 {
            1.0
        } else {
            (entry_size / max_size).sqrt()
        }
    } else {
        entry_size
    };
    reference * factor
}

/// Smaller of the content height and the pixel width of one x unit.
fn reference_size(set: &DataSet, ctx: &RenderContext) -> f64 {
    let vp = ctx.viewport;
    let trans = ctx.transformer(set.axis_dependency);
    let x0 = trans.pixel_for_values(vp, 0.0, 0.0).x;
    let x1 = trans.pixel_for_values(vp, 1.0, 0.0).x;
    let max_width = (x1 - x0).abs();
    let max_height = (vp.content_bottom() - vp.content_top()).abs();
    max_height.min(max_width)
}

pub fn draw_data_set(canvas: &mut dyn Canvas, set: &DataSet, style: &BubbleStyle, ctx: &RenderContext) {
    let vp = ctx.viewport;
    let matrix = ctx.transformer(set.axis_dependency).value_to_pixel_matrix(vp);
    let bounds = XBounds::from_chart(ctx.visible, set, ctx.phase_x);
    let reference = reference_size(set, ctx);
    let max_size = set.max_bubble_size();

    for index in bounds {
        let Some(entry) = set.entry_for_index(index) else {
            continue;
        };
        let size = entry.bubble_size().unwrap_or(0.0);
        let p = matrix.transform_point2(glam::DVec2::new(entry.x, entry.y * ctx.phase_y));
        let diameter = shape_size(size, max_size, reference, style.normalize_size);
        let half = diameter / 2.0;

        if !vp.is_in_bounds_top(p.y + half)
            || !vp.is_in_bounds_bottom(p.y - half)
            || !vp.is_in_bounds_left(p.x + half)
        {
            continue;
        }
        if !vp.is_in_bounds_right(p.x - half) {
            break;
        }

        canvas.fill_circle(p, half, style.color);
    }
}

/// Outlines the highlighted bubble.
pub fn draw_highlight(
    canvas: &mut dyn Canvas,
    set: &DataSet,
    style: &BubbleStyle,
    ctx: &RenderContext,
    highlight: &Highlight,
) {
    let Some(entry) = set
        .entries_for_x_value(highlight.x)
        .into_iter()
        .find(|e| e.y == highlight.y)
    else {
        return;
    };

    let vp = ctx.viewport;
    let p = ctx
        .transformer(set.axis_dependency)
        .pixel_for_values(vp, entry.x, entry.y * ctx.phase_y);
    let diameter = shape_size(
        entry.bubble_size().unwrap_or(0.0),
        set.max_bubble_size(),
        reference_size(set, ctx),
        style.normalize_size,
    );
    let half = diameter / 2.0;

    if !vp.is_in_bounds_top(p.y + half)
        || !vp.is_in_bounds_bottom(p.y - half)
        || !vp.is_in_bounds_left(p.x + half)
        || !vp.is_in_bounds_right(p.x - half)
    {
        return;
    }

    let opaque = gpui::Hsla {
        a: 1.0,
        ..style.color
    };
    canvas.stroke_circle(p, half, style.highlight_circle_width, opaque);
}
