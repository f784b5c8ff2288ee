use super::buffers::ScratchBuffers;
use super::RenderContext;
use crate::bounds::XBounds;
use crate::data_types::{DataSet, ScatterShape, ScatterStyle};
use crate::geometry::Rect;
use crate::rendering::Canvas;
use glam::DVec2;

pub fn draw_data_set(
    canvas: &mut dyn Canvas,
    set: &DataSet,
    style: &ScatterStyle,
    ctx: &RenderContext,
    buffers: &mut ScratchBuffers,
) {
    let vp = ctx.viewport;
    let trans = ctx.transformer(set.axis_dependency);
    let bounds = XBounds::from_chart(ctx.visible, set, ctx.phase_x);

    buffers.points.clear();
    buffers.points.extend(
        bounds
            .into_iter()
            .filter_map(|i| set.entry_for_index(i))
            .map(|e| DVec2::new(e.x, e.y * ctx.phase_y)),
    );
    trans.point_values_to_pixel(vp, &mut buffers.points);

    let size = style.shape_size as f64;
    for p in &buffers.points {
        if !vp.is_in_bounds_right(p.x) {
            break;
        }
        if !vp.is_in_bounds_left(p.x) || !vp.is_in_bounds_y(p.y) {
            continue;
        }
        draw_shape(canvas, style.shape, *p, size, style);
    }
}

fn draw_shape(canvas: &mut dyn Canvas, shape: ScatterShape, p: DVec2, size: f64, style: &ScatterStyle) {
    let half = size / 2.0;
    match shape {
        ScatterShape::Square => {
            canvas.fill_rect(Rect::new(p.x - half, p.y - half, size, size), style.color)
        }
        ScatterShape::Circle => canvas.fill_circle(p, half, style.color),
        ScatterShape::Triangle => canvas.fill_polygon(
            &[
                DVec2::new(p.x, p.y - half),
                DVec2::new(p.x + half, p.y + half),
                DVec2::new(p.x - half, p.y + half),
            ],
            style.color,
        ),
        ScatterShape::Cross => canvas.stroke_segments(
            &[
                (DVec2::new(p.x - half, p.y), DVec2::new(p.x + half, p.y)),
                (DVec2::new(p.x, p.y - half), DVec2::new(p.x, p.y + half)),
            ],
            1.0,
            style.color,
        ),
    }
}
