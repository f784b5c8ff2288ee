use super::axis::AxisDependency;
use super::data::{Entry, EntryKind, Rounding};
use super::plot_configs::SeriesStyle;

/// An x-sorted series of entries plus the style used to draw it.
#[derive(Clone, Debug)]
pub struct DataSet {
    pub label: String,
    pub axis_dependency: AxisDependency,
    pub style: SeriesStyle,
    pub visible: bool,
    pub highlight_enabled: bool,
    entries: Vec<Entry>,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl DataSet {
    /// Builds a data set; entries are sorted by x (stable, so equal x values
    /// keep their order).
    pub fn new(label: impl Into<String>, mut entries: Vec<Entry>, style: SeriesStyle) -> Self {
        entries.sort_by(|a, b| a.x.total_cmp(&b.x));
        let mut set = Self {
            label: label.into(),
            axis_dependency: AxisDependency::Left,
            style,
            visible: true,
            highlight_enabled: true,
            entries,
            x_min: f64::MAX,
            x_max: -f64::MAX,
            y_min: f64::MAX,
            y_max: -f64::MAX,
        };
        set.calc_min_max();
        set
    }

    pub fn with_axis(mut self, axis: AxisDependency) -> Self {
        self.axis_dependency = axis;
        self
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entry_for_index(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    pub fn is_stacked(&self) -> bool {
        self.entries
            .iter()
            .any(|e| matches!(e.kind, EntryKind::Stack(ref v) if v.len() > 1))
    }

    /// Segment count of the widest stacked entry, `1` for plain entries.
    pub fn stack_size(&self) -> usize {
        self.entries
            .iter()
            .filter_map(|e| e.stack_values().map(<[f64]>::len))
            .max()
            .unwrap_or(1)
            .max(1)
    }

    /// Largest bubble size, used to normalise bubble radii.
    pub fn max_bubble_size(&self) -> f64 {
        self.entries
            .iter()
            .filter_map(Entry::bubble_size)
            .fold(0.0, f64::max)
    }

    pub fn calc_min_max(&mut self) {
        self.x_min = f64::MAX;
        self.x_max = -f64::MAX;
        self.y_min = f64::MAX;
        self.y_max = -f64::MAX;

        for e in &self.entries {
            self.x_min = self.x_min.min(e.x);
            self.x_max = self.x_max.max(e.x);
            let (lo, hi) = e.y_extent();
            self.y_min = self.y_min.min(lo);
            self.y_max = self.y_max.max(hi);
        }
    }

    /// Recomputes the y extent over entries whose x lies in `[from_x, to_x]`
    /// (boundary entries found with down/up rounding).
    pub fn calc_min_max_y(&mut self, from_x: f64, to_x: f64) {
        self.y_min = f64::MAX;
        self.y_max = -f64::MAX;

        let (Some(from), Some(to)) = (
            self.entry_index(from_x, f64::NAN, Rounding::Down),
            self.entry_index(to_x, f64::NAN, Rounding::Up),
        ) else {
            return;
        };
        if to < from {
            return;
        }
        for e in &self.entries[from..=to] {
            let (lo, hi) = e.y_extent();
            self.y_min = self.y_min.min(lo);
            self.y_max = self.y_max.max(hi);
        }
    }

    /// Index of the entry closest to `x`, honouring `rounding` when no exact
    /// match exists. When `closest_to_y` is not NaN, ties on x are broken by
    /// the nearest y.
    pub fn entry_index(&self, x: f64, closest_to_y: f64, rounding: Rounding) -> Option<usize> {
        if self.entries.is_empty() {
            return None;
        }

        let values = &self.entries;
        let mut low = 0usize;
        let mut high = values.len() - 1;
        let mut closest = high;

        while low < high {
            let m = (low + high) / 2;
            let d1 = values[m].x - x;
            let d2 = values[m + 1].x - x;
            let (ad1, ad2) = (d1.abs(), d2.abs());

            if ad2 < ad1 {
                low = m + 1;
            } else if ad1 < ad2 {
                high = m;
            } else if d1 >= 0.0 {
                // equal distance, search lower
                high = m;
            } else {
                low = m + 1;
            }
            closest = high;
        }

        let closest_x = values[closest].x;
        if rounding == Rounding::Up && closest_x < x && closest < values.len() - 1 {
            closest += 1;
        } else if rounding == Rounding::Down && closest_x > x && closest > 0 {
            closest -= 1;
        }

        if !closest_to_y.is_nan() {
            let closest_x = values[closest].x;
            while closest > 0 && values[closest - 1].x == closest_x {
                closest -= 1;
            }

            let mut closest_y = values[closest].y;
            let mut closest_y_index = closest;
            for (i, e) in values.iter().enumerate().skip(closest + 1) {
                if e.x != closest_x {
                    break;
                }
                if (e.y - closest_to_y).abs() < (closest_y - closest_to_y).abs() {
                    closest_y = e.y;
                    closest_y_index = i;
                }
            }
            closest = closest_y_index;
        }

        Some(closest)
    }

    pub fn entry_for_x_value(&self, x: f64, closest_to_y: f64, rounding: Rounding) -> Option<&Entry> {
        self.entry_index(x, closest_to_y, rounding)
            .and_then(|i| self.entries.get(i))
    }

    /// All entries whose x equals `x` exactly.
    pub fn entries_for_x_value(&self, x: f64) -> Vec<&Entry> {
        let start = self.entries.partition_point(|e| e.x < x);
        self.entries[start..]
            .iter()
            .take_while(|e| e.x == x)
            .collect()
    }

    /// Inserts keeping x order and updates the cached min/max.
    pub fn add_entry(&mut self, entry: Entry) {
        let (lo, hi) = entry.y_extent();
        self.x_min = self.x_min.min(entry.x);
        self.x_max = self.x_max.max(entry.x);
        self.y_min = self.y_min.min(lo);
        self.y_max = self.y_max.max(hi);

        let index = self.entries.partition_point(|e| e.x <= entry.x);
        self.entries.insert(index, entry);
    }

    pub fn remove_entry(&mut self, index: usize) -> Option<Entry> {
        if index >= self.entries.len() {
            return None;
        }
        let removed = self.entries.remove(index);
        self.calc_min_max();
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.calc_min_max();
    }
}
