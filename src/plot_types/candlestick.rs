use super::buffers::ScratchBuffers;
use super::RenderContext;
use crate::bounds::XBounds;
use crate::data_types::{CandleStyle, DataSet, Ohlc};
use crate::geometry::Rect;
use crate::rendering::Canvas;
use glam::DVec2;
use gpui::Hsla;

fn candle_color(style: &CandleStyle, ohlc: &Ohlc) -> Hsla {
    if ohlc.is_decreasing() {
        style.decreasing_color
    } else if ohlc.is_increasing() {
        style.increasing_color
    } else {
        style.neutral_color
    }
}

/// Draws candles (shadow plus body) or open/close ticks when
/// `show_candle_bar` is off.
pub fn draw_data_set(
    canvas: &mut dyn Canvas,
    set: &DataSet,
    style: &CandleStyle,
    ctx: &RenderContext,
    buffers: &mut ScratchBuffers,
) {
    let vp = ctx.viewport;
    let trans = ctx.transformer(set.axis_dependency);
    let phase_y = ctx.phase_y;
    let bar_space = style.bar_space;
    let bounds = XBounds::from_chart(ctx.visible, set, ctx.phase_x);

    for index in bounds {
        let Some(entry) = set.entry_for_index(index) else {
            continue;
        };
        let Some(ohlc) = entry.ohlc() else {
            continue;
        };
        let x = entry.x;
        let color = candle_color(style, ohlc);

        buffers.points.clear();
        if style.show_candle_bar {
            // shadow runs from high to the top of the body and from the body
            // bottom to low
            let (body_hi, body_lo) = (ohlc.open.max(ohlc.close), ohlc.open.min(ohlc.close));
            buffers.points.extend_from_slice(&[
                DVec2::new(x, ohlc.high * phase_y),
                DVec2::new(x, body_hi * phase_y),
                DVec2::new(x, ohlc.low * phase_y),
                DVec2::new(x, body_lo * phase_y),
            ]);
            trans.point_values_to_pixel(vp, &mut buffers.points);
            let shadow = [
                (buffers.points[0], buffers.points[1]),
                (buffers.points[2], buffers.points[3]),
            ];

            let mut body = Rect::new(
                x - 0.5 + bar_space,
                ohlc.close * phase_y,
                1.0 - 2.0 * bar_space,
                (ohlc.open - ohlc.close) * phase_y,
            );
            trans.rect_value_to_pixel(vp, &mut body);
            let body = body.standardized();

            if !vp.is_in_bounds_left(body.right()) {
                continue;
            }
            if !vp.is_in_bounds_right(body.left()) {
                break;
            }

            canvas.stroke_segments(&shadow, style.shadow_width, color);
            if ohlc.is_increasing() || ohlc.is_decreasing() {
                canvas.fill_rect(body, color);
            } else {
                let y = body.top();
                canvas.stroke_segments(
                    &[(DVec2::new(body.left(), y), DVec2::new(body.right(), y))],
                    style.shadow_width,
                    color,
                );
            }
        } else {
            buffers.points.extend_from_slice(&[
                DVec2::new(x, ohlc.high * phase_y),
                DVec2::new(x, ohlc.low * phase_y),
                DVec2::new(x - 0.5 + bar_space, ohlc.open * phase_y),
                DVec2::new(x, ohlc.open * phase_y),
                DVec2::new(x + 0.5 - bar_space, ohlc.close * phase_y),
                DVec2::new(x, ohlc.close * phase_y),
            ]);
            trans.point_values_to_pixel(vp, &mut buffers.points);
            let p = &buffers.points;

            if !vp.is_in_bounds_left(p[4].x) {
                continue;
            }
            if !vp.is_in_bounds_right(p[2].x) {
                break;
            }

            let ticks = [(p[0], p[1]), (p[2], p[3]), (p[4], p[5])];
            canvas.stroke_segments(&ticks, style.shadow_width, color);
        }
    }
}
