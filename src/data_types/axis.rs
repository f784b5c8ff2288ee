use crate::axis_values::{AxisValues, IntervalParams, IntervalVariant};
use crate::utils::value_formatter::AxisValueFormatter;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub enum TimeUnit {
    Seconds,
    Milliseconds,
    Microseconds,
    Nanoseconds,
}

impl TimeUnit {
    pub fn to_seconds(self, value: f64) -> f64 {
        match self {
            TimeUnit::Seconds => value,
            TimeUnit::Milliseconds => value / 1_000.0,
            TimeUnit::Microseconds => value / 1_000_000.0,
            TimeUnit::Nanoseconds => value / 1_000_000_000.0,
        }
    }
}

/// Y axis a data set is plotted against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AxisDependency {
    #[default]
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum XAxisPosition {
    Top,
    #[default]
    Bottom,
    BothSided,
}

/// Side of the content rect an axis is drawn on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisEdge {
    Left,
    Right,
    Top,
    Bottom,
}

impl From<AxisDependency> for AxisEdge {
    fn from(dependency: AxisDependency) -> Self {
        match dependency {
            AxisDependency::Left => AxisEdge::Left,
            AxisDependency::Right => AxisEdge::Right,
        }
    }
}

pub const MIN_LABEL_COUNT: usize = 2;
pub const MAX_LABEL_COUNT: usize = 25;

/// State shared by the X and Y axes: visual toggles, label configuration and
/// the values computed for the current viewport.
#[derive(Clone, Debug)]
pub struct AxisBase {
    pub enabled: bool,
    pub draw_labels: bool,
    pub draw_grid_lines: bool,
    pub draw_axis_line: bool,
    pub granularity: f64,
    pub granularity_enabled: bool,
    pub center_axis_labels: bool,
    /// Extra space below the data minimum when no custom minimum is set.
    pub space_min: f64,
    pub space_max: f64,
    pub formatter: AxisValueFormatter,
    /// Label placement contract used when the chart computes this axis.
    pub interval_variant: IntervalVariant,

    label_count: usize,
    force_label_count: bool,
    custom_min: Option<f64>,
    custom_max: Option<f64>,

    pub axis_minimum: f64,
    pub axis_maximum: f64,
    pub axis_range: f64,
    pub entries: Vec<f64>,
    pub centered_entries: Vec<f64>,
    pub decimals: usize,
    pub interval: f64,
}

impl Default for AxisBase {
    fn default() -> Self {
        Self {
            enabled: true,
            draw_labels: true,
            draw_grid_lines: true,
            draw_axis_line: true,
            granularity: 1.0,
            granularity_enabled: false,
            center_axis_labels: false,
            space_min: 0.0,
            space_max: 0.0,
            formatter: AxisValueFormatter::Decimals,
            interval_variant: IntervalVariant::Standard,
            label_count: 6,
            force_label_count: false,
            custom_min: None,
            custom_max: None,
            axis_minimum: 0.0,
            axis_maximum: 0.0,
            axis_range: 0.0,
            entries: Vec::new(),
            centered_entries: Vec::new(),
            decimals: 0,
            interval: 0.0,
        }
    }
}

impl AxisBase {
    pub fn label_count(&self) -> usize {
        self.label_count
    }

    pub fn is_force_label_count(&self) -> bool {
        self.force_label_count
    }

    /// Clamps to `2..=25` and turns forced mode off.
    pub fn set_label_count_unforced(&mut self, count: usize) {
        self.set_label_count(count, false);
    }

    pub fn set_label_count(&mut self, count: usize, force: bool) {
        self.label_count = count.clamp(MIN_LABEL_COUNT, MAX_LABEL_COUNT);
        self.force_label_count = force;
    }

    pub fn custom_min(&self) -> Option<f64> {
        self.custom_min
    }

    pub fn custom_max(&self) -> Option<f64> {
        self.custom_max
    }

    pub fn set_axis_minimum(&mut self, min: f64) {
        self.custom_min = Some(min);
        self.axis_minimum = min;
        self.axis_range = (self.axis_maximum - min).abs();
    }

    pub fn set_axis_maximum(&mut self, max: f64) {
        self.custom_max = Some(max);
        self.axis_maximum = max;
        self.axis_range = (max - self.axis_minimum).abs();
    }

    pub fn reset_custom_axis_min(&mut self) {
        self.custom_min = None;
    }

    pub fn reset_custom_axis_max(&mut self) {
        self.custom_max = None;
    }

    /// Sets the axis extent from the data extent: custom bounds win, otherwise
    /// the data bounds are padded by `space_min`/`space_max`. A zero range is
    /// widened by one unit on each side.
    pub fn calculate(&mut self, data_min: f64, data_max: f64) {
        let mut min = self.custom_min.unwrap_or(data_min - self.space_min);
        let mut max = self.custom_max.unwrap_or(data_max + self.space_max);

        if (max - min).abs() == 0.0 {
            max += 1.0;
            min -= 1.0;
        }

        self.axis_minimum = min;
        self.axis_maximum = max;
        self.axis_range = (max - min).abs();
    }

    pub fn interval_params(&self) -> IntervalParams {
        IntervalParams {
            label_count: self.label_count,
            granularity: self.granularity_enabled.then_some(self.granularity),
            force_label_count: self.force_label_count,
            center_labels: self.center_axis_labels,
        }
    }

    /// Stores freshly computed values; an axis range override (radar axes)
    /// replaces the computed extent.
    pub fn apply_values(&mut self, values: AxisValues) {
        if let Some((min, max)) = values.axis_range_override {
            self.axis_minimum = min;
            self.axis_maximum = max;
            self.axis_range = (max - min).abs();
        }
        self.entries = values.entries;
        self.centered_entries = values.centered_entries;
        self.decimals = values.decimals;
        self.interval = values.interval;
    }

    /// Entries labels are drawn at (centered ones when centering is on).
    pub fn label_positions(&self) -> &[f64] {
        if self.center_axis_labels && !self.centered_entries.is_empty() {
            &self.centered_entries
        } else {
            &self.entries
        }
    }

    pub fn formatted_label(&self, value: f64) -> String {
        self.formatter.format(value, self.decimals, self.axis_range)
    }

    /// Longest label at the current decimals, used to size the axis gutter.
    pub fn longest_label(&self) -> String {
        self.entries
            .iter()
            .map(|v| self.formatted_label(*v))
            .max_by_key(|s| s.len())
            .unwrap_or_default()
    }
}

#[derive(Clone, Debug)]
pub struct XAxis {
    pub base: AxisBase,
    pub position: XAxisPosition,
    pub avoid_first_last_clipping: bool,
}

impl Default for XAxis {
    fn default() -> Self {
        Self {
            base: AxisBase::default(),
            position: XAxisPosition::Bottom,
            avoid_first_last_clipping: false,
        }
    }
}

impl XAxis {
    pub fn calculate(&mut self, data_min: f64, data_max: f64) {
        self.base.calculate(data_min, data_max);
    }
}

#[derive(Clone, Debug)]
pub struct YAxis {
    pub base: AxisBase,
    pub dependency: AxisDependency,
    pub inverted: bool,
    /// Fraction of the data range added above the maximum.
    pub space_top: f64,
    pub space_bottom: f64,
}

impl YAxis {
    pub fn new(dependency: AxisDependency) -> Self {
        Self {
            base: AxisBase::default(),
            dependency,
            inverted: false,
            space_top: 0.1,
            space_bottom: 0.1,
        }
    }

    /// Like [`AxisBase::calculate`], but the padding is a fraction of the data
    /// range instead of an absolute amount. A zero range is widened by one
    /// unit on each side and left unpadded.
    pub fn calculate(&mut self, data_min: f64, data_max: f64) {
        let base = &mut self.base;
        let mut min = base.custom_min.unwrap_or(data_min);
        let mut max = base.custom_max.unwrap_or(data_max);

        // padding follows the data range, so equal values get none
        let range = (max - min).abs();
        if range == 0.0 {
            max += 1.0;
            min -= 1.0;
        }

        if base.custom_min.is_none() {
            min -= range * self.space_bottom;
        }
        if base.custom_max.is_none() {
            max += range * self.space_top;
        }

        base.axis_minimum = min;
        base.axis_maximum = max;
        base.axis_range = (max - min).abs();
    }
}
