use crate::data_types::{DataSet, Entry};
use crate::geometry::Rect;
use glam::DVec2;

/// Per-frame scratch space reused across data sets and frames.
#[derive(Debug, Default)]
pub struct ScratchBuffers {
    pub bars: Vec<BarRect>,
    pub points: Vec<DVec2>,
    pub simplified: Vec<DVec2>,
    pub segments: Vec<(DVec2, DVec2)>,
    /// Flattened curves and fill outlines, in pixels.
    pub path: Vec<DVec2>,
    pub fill: Vec<DVec2>,
}

impl ScratchBuffers {
    pub fn clear(&mut self) {
        self.bars.clear();
        self.points.clear();
        self.simplified.clear();
        self.segments.clear();
        self.path.clear();
        self.fill.clear();
    }
}

/// A bar (or one stack segment) in value space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarRect {
    pub rect: Rect,
    pub entry_index: usize,
    /// Stack segment index, 0 for plain bars.
    pub stack_index: usize,
}

/// Value-space rect of a bar from `bottom` to `top` centered on `x`.
pub(crate) fn bar_rect(x: f64, bar_width: f64, top: f64, bottom: f64) -> Rect {
    let half = bar_width / 2.0;
    let left = x - half;
    let right = x + half;
    Rect::new(left, top, right - left, bottom - top)
}

/// Fills `out` with the bar rects of `set`. Only the first
/// `ceil(count * phase_x)` entries are emitted; heights are scaled by
/// `phase_y`.
pub fn feed_bar_buffer(
    set: &DataSet,
    bar_width: f64,
    phase_x: f64,
    phase_y: f64,
    inverted: bool,
    out: &mut Vec<BarRect>,
) {
    out.clear();
    let count = set.entry_count();
    let limit = ((count as f64 * phase_x.clamp(0.0, 1.0)).ceil() as usize).min(count);

    for (entry_index, entry) in set.entries().iter().enumerate().take(limit) {
        match entry.stack_values() {
            Some(values) if values.len() > 1 => {
                feed_stack(entry, values, bar_width, phase_y, inverted, entry_index, out)
            }
            _ => {
                let y = entry.y;
                let mut top = if inverted { y.min(0.0) } else { y.max(0.0) };
                let mut bottom = if inverted { y.max(0.0) } else { y.min(0.0) };

                if top > 0.0 {
                    top *= phase_y;
                } else {
                    bottom *= phase_y;
                }

                out.push(BarRect {
                    rect: bar_rect(entry.x, bar_width, top, bottom),
                    entry_index,
                    stack_index: 0,
                });
            }
        }
    }
}

fn feed_stack(
    entry: &Entry,
    values: &[f64],
    bar_width: f64,
    phase_y: f64,
    inverted: bool,
    entry_index: usize,
    out: &mut Vec<BarRect>,
) {
    let mut pos_y = 0.0;
    let mut neg_y = -entry.negative_sum();

    for (stack_index, &value) in values.iter().enumerate() {
        let (y, y_start) = if value == 0.0 && (pos_y == 0.0 || neg_y == 0.0) {
            // zero segment collapses onto the baseline
            (value, value)
        } else if value >= 0.0 {
            let start = pos_y + value;
            let y = pos_y;
            pos_y = start;
            (y, start)
        } else {
            let start = neg_y + value.abs();
            let y = neg_y;
            neg_y += value.abs();
            (y, start)
        };

        let (mut top, mut bottom) = if inverted {
            (y.min(y_start), y.max(y_start))
        } else {
            (y.max(y_start), y.min(y_start))
        };
        top *= phase_y;
        bottom *= phase_y;

        out.push(BarRect {
            rect: bar_rect(entry.x, bar_width, top, bottom),
            entry_index,
            stack_index,
        });
    }
}
