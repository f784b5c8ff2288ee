use super::axis::AxisDependency;

/// A selected entry together with where it was drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Highlight {
    pub x: f64,
    pub y: f64,
    pub x_px: f64,
    pub y_px: f64,
    pub data_set_index: usize,
    /// Segment index for stacked bars.
    pub stack_index: Option<usize>,
    pub axis: AxisDependency,
}

impl Highlight {
    pub fn new(x: f64, y: f64, data_set_index: usize) -> Self {
        Self {
            x,
            y,
            x_px: f64::NAN,
            y_px: f64::NAN,
            data_set_index,
            stack_index: None,
            axis: AxisDependency::Left,
        }
    }

    pub fn is_stacked(&self) -> bool {
        self.stack_index.is_some()
    }

    /// Same entry, ignoring where it was drawn.
    pub fn same_entry(&self, other: &Highlight) -> bool {
        self.x == other.x
            && self.data_set_index == other.data_set_index
            && self.stack_index == other.stack_index
    }
}
