use super::buffers::ScratchBuffers;
use super::{segment_outside, RenderContext};
use crate::bounds::XBounds;
use crate::data_types::{DataSet, FillPosition, LineFill, LineMode, LineStyle};
use crate::decimation::reduce_with_douglas_peucker_into;
use crate::geometry::flatten_cubic;
use crate::rendering::Canvas;
use glam::DVec2;

/// Points sampled per Bezier piece.
pub const CURVE_STEPS: usize = 16;

/// Draws the visible entries in the line mode of `style`, with its fill and
/// circles.
pub fn draw_data_set(
    canvas: &mut dyn Canvas,
    set: &DataSet,
    style: &LineStyle,
    ctx: &RenderContext,
    buffers: &mut ScratchBuffers,
) {
    match style.mode {
        LineMode::Linear | LineMode::Stepped => draw_linear(canvas, set, style, ctx, buffers),
        LineMode::CubicBezier => {
            cubic_bezier_path(set, style, ctx, &mut buffers.path);
            finish_curve(canvas, set, style, ctx, buffers);
        }
        LineMode::HorizontalBezier => {
            horizontal_bezier_path(set, ctx, &mut buffers.path);
            finish_curve(canvas, set, style, ctx, buffers);
        }
    }

    if style.draw_circles {
        draw_circles(canvas, set, style, ctx, buffers);
    }
}

/// Y value the fill of `set` closes against.
pub fn fill_line_position(set: &DataSet, position: FillPosition, axis_extent: (f64, f64)) -> f64 {
    match position {
        FillPosition::Value(y) => y,
        FillPosition::Auto if set.y_max() > 0.0 && set.y_min() < 0.0 => 0.0,
        FillPosition::Auto if set.y_min() >= 0.0 => axis_extent.0,
        FillPosition::Auto => axis_extent.1,
    }
}

fn draw_linear(
    canvas: &mut dyn Canvas,
    set: &DataSet,
    style: &LineStyle,
    ctx: &RenderContext,
    buffers: &mut ScratchBuffers,
) {
    let vp = ctx.viewport;
    let trans = ctx.transformer(set.axis_dependency);
    let bounds = XBounds::from_chart(ctx.visible, set, ctx.phase_x);
    let stepped = style.mode == LineMode::Stepped;

    buffers.points.clear();
    let mut previous: Option<DVec2> = None;
    for index in bounds {
        let Some(entry) = set.entry_for_index(index) else {
            continue;
        };
        let p = DVec2::new(entry.x, entry.y * ctx.phase_y);
        if stepped {
            if let Some(prev) = previous {
                buffers.points.push(DVec2::new(p.x, prev.y));
            }
        }
        buffers.points.push(p);
        previous = Some(p);
    }

    if buffers.points.len() < 2 {
        return;
    }

    trans.point_values_to_pixel(vp, &mut buffers.points);

    if let Some(fill) = &style.fill {
        fill_under(canvas, set, fill, ctx, &buffers.points, &mut buffers.path);
    }

    let points = match style.simplify_tolerance {
        Some(tolerance) if tolerance > 0.0 && !stepped => {
            reduce_with_douglas_peucker_into(&buffers.points, tolerance, &mut buffers.simplified);
            &buffers.simplified
        }
        _ => &buffers.points,
    };

    buffers.segments.clear();
    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if !a.is_finite() || !b.is_finite() || segment_outside(vp, a, b) {
            continue;
        }
        buffers.segments.push((a, b));
    }
    canvas.stroke_segments(&buffers.segments, style.line_width, style.color);
}

/// Cubic spline in pixels. Each piece takes its tangents from the
/// neighbouring entries, so one extra entry is read on both sides.
fn cubic_bezier_path(set: &DataSet, style: &LineStyle, ctx: &RenderContext, path: &mut Vec<DVec2>) {
    path.clear();
    let bounds = XBounds::from_chart(ctx.visible, set, ctx.phase_x);
    if bounds.range < 1 {
        return;
    }

    let matrix = ctx
        .transformer(set.axis_dependency)
        .value_to_pixel_matrix(ctx.viewport);
    let phase_y = ctx.phase_y;
    let to_px = |p: DVec2| matrix.transform_point2(DVec2::new(p.x, p.y * phase_y));
    let at = |i: usize| set.entry_for_index(i).map(|e| DVec2::new(e.x, e.y));
    let intensity = style.cubic_intensity.clamp(0.05, 1.0);

    let first_index = bounds.min + 1;
    let last_index = bounds.min + bounds.range;
    let (Some(mut prev), Some(mut cur)) = (at(first_index.saturating_sub(2)), at(bounds.min))
    else {
        return;
    };
    let mut next = cur;
    let mut next_index = None;

    path.push(to_px(cur));
    for j in first_index..=last_index {
        let prev_prev = prev;
        prev = cur;
        cur = match (next_index == Some(j), at(j)) {
            (true, _) => next,
            (false, Some(p)) => p,
            (false, None) => break,
        };

        let ni = if j + 1 < set.entry_count() { j + 1 } else { j };
        next_index = Some(ni);
        let Some(n) = at(ni) else {
            break;
        };
        next = n;

        let prev_d = (cur - prev_prev) * intensity;
        let cur_d = (next - prev) * intensity;
        flatten_cubic(
            to_px(prev),
            to_px(prev + prev_d),
            to_px(cur - cur_d),
            to_px(cur),
            CURVE_STEPS,
            path,
        );
    }
}

/// Curves whose control points share the x halfway between two entries.
fn horizontal_bezier_path(set: &DataSet, ctx: &RenderContext, path: &mut Vec<DVec2>) {
    path.clear();
    let bounds = XBounds::from_chart(ctx.visible, set, ctx.phase_x);
    if bounds.range == 0 {
        return;
    }

    let matrix = ctx
        .transformer(set.axis_dependency)
        .value_to_pixel_matrix(ctx.viewport);
    let phase_y = ctx.phase_y;
    let to_px = |x: f64, y: f64| matrix.transform_point2(DVec2::new(x, y * phase_y));

    let Some(first) = set.entry_for_index(bounds.min) else {
        return;
    };
    let mut cur = DVec2::new(first.x, first.y);
    path.push(to_px(cur.x, cur.y));

    for j in bounds.min + 1..=bounds.min + bounds.range {
        let Some(entry) = set.entry_for_index(j) else {
            break;
        };
        let prev = cur;
        cur = DVec2::new(entry.x, entry.y);
        let cpx = prev.x + (cur.x - prev.x) / 2.0;
        flatten_cubic(
            to_px(prev.x, prev.y),
            to_px(cpx, prev.y),
            to_px(cpx, cur.y),
            to_px(cur.x, cur.y),
            CURVE_STEPS,
            path,
        );
    }
}

fn finish_curve(
    canvas: &mut dyn Canvas,
    set: &DataSet,
    style: &LineStyle,
    ctx: &RenderContext,
    buffers: &mut ScratchBuffers,
) {
    if buffers.path.len() < 2 {
        return;
    }
    if let Some(fill) = &style.fill {
        fill_under(canvas, set, fill, ctx, &buffers.path, &mut buffers.fill);
    }
    canvas.stroke_polyline(&buffers.path, style.line_width, style.color);
}

/// Closes `outline` (pixels, left to right) against the fill line and paints
/// the area.
fn fill_under(
    canvas: &mut dyn Canvas,
    set: &DataSet,
    fill: &LineFill,
    ctx: &RenderContext,
    outline: &[DVec2],
    polygon: &mut Vec<DVec2>,
) {
    let (Some(&first), Some(&last)) = (outline.first(), outline.last()) else {
        return;
    };
    let base = fill_line_position(set, fill.position, ctx.axis_extent(set.axis_dependency));
    let base_y = ctx
        .transformer(set.axis_dependency)
        .pixel_for_values(ctx.viewport, 0.0, base)
        .y;

    polygon.clear();
    polygon.extend_from_slice(outline);
    polygon.push(DVec2::new(last.x, base_y));
    polygon.push(DVec2::new(first.x, base_y));
    canvas.fill_polygon(polygon, fill.paint_color());
}

fn draw_circles(
    canvas: &mut dyn Canvas,
    set: &DataSet,
    style: &LineStyle,
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

    let radius = style.circle_radius as f64;
    for p in &buffers.points {
        if !vp.is_in_bounds_right(p.x) {
            break;
        }
        if !vp.is_in_bounds_left(p.x) || !vp.is_in_bounds_y(p.y) {
            continue;
        }
        canvas.fill_circle(*p, radius, style.circle_color);
    }
}
