use crate::data_types::{AxisDependency, ChartData, DataSet, Highlight, Rounding};
use crate::transformer::Transformer;
use crate::viewport::ViewPortHandler;
use glam::DVec2;

pub const DEFAULT_MAX_HIGHLIGHT_DISTANCE: f64 = 500.0;

/// What the highlighter needs to see of a chart.
pub trait HighlightSource {
    fn chart_data(&self) -> &ChartData;
    fn viewport(&self) -> &ViewPortHandler;
    fn transformer(&self, axis: AxisDependency) -> &Transformer;
}

/// Resolves touch positions to highlighted entries.
#[derive(Clone, Debug)]
pub struct ChartHighlighter {
    /// Touches farther than this many pixels from every entry select nothing.
    pub max_highlight_distance: f64,
}

impl Default for ChartHighlighter {
    fn default() -> Self {
        Self {
            max_highlight_distance: DEFAULT_MAX_HIGHLIGHT_DISTANCE,
        }
    }
}

impl ChartHighlighter {
    pub fn new(max_highlight_distance: f64) -> Self {
        Self {
            max_highlight_distance,
        }
    }

    /// Highlight for a touch at `(x, y)` in chart pixels.
    pub fn highlight(&self, chart: &dyn HighlightSource, x: f64, y: f64) -> Option<Highlight> {
        let touch = DVec2::new(x, y);
        let x_value = chart
            .transformer(AxisDependency::Left)
            .value_for_touch_point(chart.viewport(), touch)
            .x;

        let candidates = self.highlights_for_x(chart, x_value);
        if candidates.is_empty() {
            return None;
        }

        let left = min_distance(&candidates, y, AxisDependency::Left);
        let right = min_distance(&candidates, y, AxisDependency::Right);
        let axis = if left < right {
            AxisDependency::Left
        } else {
            AxisDependency::Right
        };

        let closest = candidates
            .iter()
            .filter(|h| h.axis == axis)
            .map(|h| (h, (x - h.x_px).hypot(y - h.y_px)))
            .filter(|(_, d)| *d < self.max_highlight_distance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(h, _)| *h)?;

        let set = chart.chart_data().data_set(closest.data_set_index)?;
        if set.is_stacked() {
            return self.stacked_highlight(chart, set, closest, touch);
        }
        Some(closest)
    }

    /// One highlight per entry at the x closest to `x_value`, for every
    /// highlight-enabled data set.
    pub fn highlights_for_x(&self, chart: &dyn HighlightSource, x_value: f64) -> Vec<Highlight> {
        let data = chart.chart_data();
        let vp = chart.viewport();
        let mut out = Vec::new();

        for (index, set) in data.data_sets().iter().enumerate() {
            if !set.highlight_enabled || !set.visible {
                continue;
            }

            let mut entries = set.entries_for_x_value(x_value);
            if entries.is_empty() {
                if let Some(closest) = set.entry_for_x_value(x_value, f64::NAN, Rounding::Closest) {
                    entries = set.entries_for_x_value(closest.x);
                }
            }

            let trans = chart.transformer(set.axis_dependency);
            for e in entries {
                let px = trans.pixel_for_values(vp, e.x, e.y);
                out.push(Highlight {
                    x: e.x,
                    y: e.y,
                    x_px: px.x,
                    y_px: px.y,
                    data_set_index: index,
                    stack_index: None,
                    axis: set.axis_dependency,
                });
            }
        }
        out
    }

    /// Narrows a stacked bar highlight to the segment under the touch.
    fn stacked_highlight(
        &self,
        chart: &dyn HighlightSource,
        set: &DataSet,
        highlight: Highlight,
        touch: DVec2,
    ) -> Option<Highlight> {
        let entry = set.entry_for_x_value(highlight.x, highlight.y, Rounding::Closest)?;
        let ranges = entry.stack_ranges();
        if ranges.is_empty() {
            return Some(highlight);
        }

        let trans = chart.transformer(set.axis_dependency);
        let vp = chart.viewport();
        let y_value = trans.value_for_touch_point(vp, touch).y;
        let stack_index = closest_stack_index(&ranges, y_value);
        let (_, to) = ranges[stack_index];
        let px = trans.pixel_for_values(vp, highlight.x, to);

        Some(Highlight {
            y: to,
            x_px: px.x,
            y_px: px.y,
            stack_index: Some(stack_index),
            ..highlight
        })
    }
}

fn min_distance(highlights: &[Highlight], pos: f64, axis: AxisDependency) -> f64 {
    highlights
        .iter()
        .filter(|h| h.axis == axis)
        .map(|h| (h.y_px - pos).abs())
        .fold(f64::MAX, f64::min)
}

/// Index of the stack range containing `value`; values beyond the stack snap
/// to the nearest end.
pub fn closest_stack_index(ranges: &[(f64, f64)], value: f64) -> usize {
    if let Some(index) = ranges
        .iter()
        .position(|&(from, to)| value > from.min(to) && value <= from.max(to))
    {
        return index;
    }
    let max = ranges
        .iter()
        .map(|&(from, to)| from.max(to))
        .fold(f64::MIN, f64::max);
    if value > max {
        ranges.len().saturating_sub(1)
    } else {
        0
    }
}
