/// Open/high/low/close values of a candlestick entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ohlc {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Ohlc {
    pub fn is_increasing(&self) -> bool {
        self.close > self.open
    }

    pub fn is_decreasing(&self) -> bool {
        self.close < self.open
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub enum EntryKind {
    #[default]
    Point,
    /// Stacked bar values, bottom to top.
    Stack(Vec<f64>),
    Candle(Ohlc),
    Bubble { size: f64 },
}

/// One data point. `y` is the value used for sorting, searching and
/// highlighting; kind-specific values live in `kind`.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Entry {
    pub x: f64,
    pub y: f64,
    pub kind: EntryKind,
}

impl Entry {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            kind: EntryKind::Point,
        }
    }

    /// Stacked bar entry; `y` is the sum of the stack.
    pub fn stacked(x: f64, values: Vec<f64>) -> Self {
        Self {
            x,
            y: values.iter().sum(),
            kind: EntryKind::Stack(values),
        }
    }

    /// Candle entry; `y` is the midpoint of the shadow.
    pub fn candle(x: f64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            x,
            y: (high + low) / 2.0,
            kind: EntryKind::Candle(Ohlc {
                open,
                high,
                low,
                close,
            }),
        }
    }

    pub fn bubble(x: f64, y: f64, size: f64) -> Self {
        Self {
            x,
            y,
            kind: EntryKind::Bubble { size },
        }
    }

    pub fn stack_values(&self) -> Option<&[f64]> {
        match &self.kind {
            EntryKind::Stack(values) => Some(values),
            _ => None,
        }
    }

    pub fn ohlc(&self) -> Option<&Ohlc> {
        match &self.kind {
            EntryKind::Candle(ohlc) => Some(ohlc),
            _ => None,
        }
    }

    pub fn bubble_size(&self) -> Option<f64> {
        match self.kind {
            EntryKind::Bubble { size } => Some(size),
            _ => None,
        }
    }

    /// Magnitude of the negative stack values (0 for non-stacked entries).
    pub fn negative_sum(&self) -> f64 {
        self.stack_values()
            .map(|v| v.iter().filter(|x| **x < 0.0).map(|x| x.abs()).sum())
            .unwrap_or(0.0)
    }

    /// Sum of the positive stack values (0 for non-stacked entries).
    pub fn positive_sum(&self) -> f64 {
        self.stack_values()
            .map(|v| v.iter().filter(|x| **x > 0.0).sum())
            .unwrap_or(0.0)
    }

    /// Vertical extent the entry covers, used for the data set min/max.
    pub fn y_extent(&self) -> (f64, f64) {
        match &self.kind {
            EntryKind::Stack(_) => (-self.negative_sum(), self.positive_sum()),
            EntryKind::Candle(ohlc) => (ohlc.low, ohlc.high),
            _ => (self.y, self.y),
        }
    }

    /// `(from, to)` value range of each stack segment in declaration order.
    /// Negative segments start at the bottom of the negative stack and grow
    /// towards zero, positive ones grow upwards from zero.
    pub fn stack_ranges(&self) -> Vec<(f64, f64)> {
        let Some(values) = self.stack_values() else {
            return Vec::new();
        };
        let mut neg_remain = -self.negative_sum();
        let mut pos_remain = 0.0;
        values
            .iter()
            .map(|&value| {
                if value < 0.0 {
                    let range = (neg_remain, neg_remain - value);
                    neg_remain -= value;
                    range
                } else {
                    let range = (pos_remain, pos_remain + value);
                    pos_remain += value;
                    range
                }
            })
            .collect()
    }
}

/// Rounding used when searching entries by x value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rounding {
    Up,
    Down,
    Closest,
}
