use crate::data_types::{DataSet, Rounding};
use std::fmt;
use std::ops::RangeInclusive;

/// Source of the x window currently on screen, in data values.
pub trait VisibleXRange {
    fn lowest_visible_x(&self) -> f64;
    fn highest_visible_x(&self) -> f64;
}

/// Index window of a data set that is visible on screen, shortened by the
/// x animation phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct XBounds {
    pub min: usize,
    pub max: usize,
    pub range: usize,
}

impl XBounds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_chart(chart: &dyn VisibleXRange, data_set: &DataSet, phase_x: f64) -> Self {
        let mut bounds = Self::default();
        bounds.set(chart, data_set, phase_x);
        bounds
    }

    /// Recomputes the window. The boundary entries just outside the visible
    /// range are included so lines reach the content edges.
    pub fn set(&mut self, chart: &dyn VisibleXRange, data_set: &DataSet, phase_x: f64) {
        let phase_x = if phase_x.is_nan() {
            0.0
        } else {
            phase_x.clamp(0.0, 1.0)
        };

        let low = chart.lowest_visible_x();
        let high = chart.highest_visible_x();

        self.min = data_set
            .entry_index(low, f64::NAN, Rounding::Down)
            .unwrap_or(0);
        self.max = data_set
            .entry_index(high, f64::NAN, Rounding::Up)
            .unwrap_or(0);
        self.range = (self.max.saturating_sub(self.min) as f64 * phase_x).floor() as usize;
    }

    pub fn as_range(&self) -> RangeInclusive<usize> {
        self.min..=self.min + self.range
    }

    pub fn iter(&self) -> RangeInclusive<usize> {
        self.as_range()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.as_range().contains(&index)
    }
}

impl IntoIterator for XBounds {
    type Item = usize;
    type IntoIter = RangeInclusive<usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_range()
    }
}

impl IntoIterator for &XBounds {
    type Item = usize;
    type IntoIter = RangeInclusive<usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_range()
    }
}

impl fmt::Display for XBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "min:{}, max:{}, range:{}", self.min, self.max, self.range)
    }
}
