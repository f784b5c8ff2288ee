use super::axis::AxisDependency;
use super::data::Entry;
use super::data_set::DataSet;
use super::highlight::Highlight;
use super::plot_configs::SeriesStyle;

pub const DEFAULT_BAR_WIDTH: f64 = 0.85;

/// All data sets of a chart plus their combined extents per axis.
#[derive(Clone, Debug)]
pub struct ChartData {
    data_sets: Vec<DataSet>,
    /// Bar width in x units.
    pub bar_width: f64,
    x_min: f64,
    x_max: f64,
    left_min: f64,
    left_max: f64,
    right_min: f64,
    right_max: f64,
}

impl Default for ChartData {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ChartData {
    pub fn new(data_sets: Vec<DataSet>) -> Self {
        let mut data = Self {
            data_sets,
            bar_width: DEFAULT_BAR_WIDTH,
            x_min: f64::MAX,
            x_max: -f64::MAX,
            left_min: f64::MAX,
            left_max: -f64::MAX,
            right_min: f64::MAX,
            right_max: -f64::MAX,
        };
        data.calc_min_max();
        data
    }

    pub fn data_sets(&self) -> &[DataSet] {
        &self.data_sets
    }

    pub fn data_sets_mut(&mut self) -> &mut [DataSet] {
        &mut self.data_sets
    }

    pub fn data_set(&self, index: usize) -> Option<&DataSet> {
        self.data_sets.get(index)
    }

    pub fn add_data_set(&mut self, set: DataSet) {
        self.data_sets.push(set);
        self.calc_min_max();
    }

    pub fn remove_data_set(&mut self, index: usize) -> Option<DataSet> {
        if index >= self.data_sets.len() {
            return None;
        }
        let removed = self.data_sets.remove(index);
        self.calc_min_max();
        Some(removed)
    }

    pub fn data_set_count(&self) -> usize {
        self.data_sets.len()
    }

    pub fn entry_count(&self) -> usize {
        self.data_sets.iter().map(DataSet::entry_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entry_count() == 0
    }

    pub fn calc_min_max(&mut self) {
        for set in self.data_sets.iter_mut() {
            set.calc_min_max();
        }
        self.x_min = f64::MAX;
        self.x_max = -f64::MAX;
        for set in self.data_sets.iter().filter(|s| !s.is_empty()) {
            self.x_min = self.x_min.min(set.x_min());
            self.x_max = self.x_max.max(set.x_max());
        }
        self.calc_min_max_y_only();
    }

    /// Recomputes the y extents over the visible x window only.
    pub fn calc_min_max_y(&mut self, from_x: f64, to_x: f64) {
        for set in self.data_sets.iter_mut() {
            set.calc_min_max_y(from_x, to_x);
        }
        self.calc_min_max_y_only();
    }

    fn calc_min_max_y_only(&mut self) {
        self.left_min = f64::MAX;
        self.left_max = -f64::MAX;
        self.right_min = f64::MAX;
        self.right_max = -f64::MAX;
        for set in self.data_sets.iter().filter(|s| !s.is_empty()) {
            let (min, max) = match set.axis_dependency {
                AxisDependency::Left => (&mut self.left_min, &mut self.left_max),
                AxisDependency::Right => (&mut self.right_min, &mut self.right_max),
            };
            *min = min.min(set.y_min());
            *max = max.max(set.y_max());
        }
    }

    pub fn has_bars(&self) -> bool {
        self.data_sets
            .iter()
            .any(|s| matches!(s.style, SeriesStyle::Bar(_)))
    }

    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    /// Falls back to the other axis when no data set depends on `axis`.
    pub fn y_min(&self, axis: AxisDependency) -> f64 {
        match axis {
            AxisDependency::Left if self.left_min == f64::MAX => self.right_min,
            AxisDependency::Left => self.left_min,
            AxisDependency::Right if self.right_min == f64::MAX => self.left_min,
            AxisDependency::Right => self.right_min,
        }
    }

    pub fn y_max(&self, axis: AxisDependency) -> f64 {
        match axis {
            AxisDependency::Left if self.left_max == -f64::MAX => self.right_max,
            AxisDependency::Left => self.left_max,
            AxisDependency::Right if self.right_max == -f64::MAX => self.left_max,
            AxisDependency::Right => self.right_max,
        }
    }

    pub fn entry_for_highlight(&self, highlight: &Highlight) -> Option<&Entry> {
        self.data_sets
            .get(highlight.data_set_index)?
            .entries_for_x_value(highlight.x)
            .into_iter()
            .find(|e| e.y == highlight.y || highlight.y.is_nan())
    }
}
