//! "Nice number" label placement for an axis extent.
//!
//! Three placement contracts exist, one per axis kind:
//!
//! * [`IntervalVariant::Standard`] for the regular X and Y axes,
//! * [`IntervalVariant::CustomInterval`] which skips the normalisation step and
//!   appends one trailing half-interval entry,
//! * [`IntervalVariant::Radar`] which always emits one more entry than the
//!   stride count and rewrites the axis extent to the first/last entry.

use crate::utils::{interval_decimals, next_up, round_to_next_significant};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum IntervalVariant {
    #[default]
    Standard,
    CustomInterval,
    Radar,
}

/// Label configuration consumed by [`compute_axis_values`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntervalParams {
    pub label_count: usize,
    /// Lower bound for the interval, when enabled.
    pub granularity: Option<f64>,
    pub force_label_count: bool,
    pub center_labels: bool,
}

impl IntervalParams {
    pub fn new(label_count: usize) -> Self {
        Self {
            label_count,
            granularity: None,
            force_label_count: false,
            center_labels: false,
        }
    }

    pub fn forced(mut self) -> Self {
        self.force_label_count = true;
        self
    }

    pub fn centered(mut self) -> Self {
        self.center_labels = true;
        self
    }

    pub fn with_granularity(mut self, granularity: f64) -> Self {
        self.granularity = Some(granularity);
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AxisValues {
    pub entries: Vec<f64>,
    pub centered_entries: Vec<f64>,
    pub decimals: usize,
    pub interval: f64,
    /// New `(min, max)` for the axis; only radar axes set this.
    pub axis_range_override: Option<(f64, f64)>,
}

/// Computes label positions between `min` and `max`.
pub fn compute_axis_values(
    min: f64,
    max: f64,
    params: &IntervalParams,
    variant: IntervalVariant,
) -> AxisValues {
    let label_count = params.label_count;
    let range = (max - min).abs();

    if label_count == 0 || range <= 0.0 || !range.is_finite() {
        return AxisValues::default();
    }

    let raw_interval = range / label_count as f64;
    let mut interval = round_to_next_significant(raw_interval);

    if let Some(granularity) = params.granularity {
        if interval < granularity {
            interval = granularity;
        }
    }

    match variant {
        IntervalVariant::Standard => {
            interval = normalize(interval, interval.log10().trunc());
            accumulate(min, max, interval, params, false)
        }
        IntervalVariant::CustomInterval => accumulate(min, max, interval, params, true),
        IntervalVariant::Radar => {
            interval = normalize(interval, interval.log10().floor());
            radar(min, max, interval, range, params)
        }
    }
}

/// Bumps an interval whose leading digit is above 5 to the next power of ten.
fn normalize(interval: f64, exponent: f64) -> f64 {
    let magnitude = round_to_next_significant(10f64.powf(exponent));
    let sig_digit = (interval / magnitude) as i64;
    if sig_digit > 5 {
        (10.0 * magnitude).floor()
    } else {
        interval
    }
}

fn first_and_last(min: f64, max: f64, interval: f64, center: bool) -> (f64, f64) {
    let mut first = if interval == 0.0 {
        0.0
    } else {
        (min / interval).ceil() * interval
    };
    if center {
        first -= interval;
    }
    let last = if interval == 0.0 {
        0.0
    } else {
        next_up((max / interval).floor() * interval)
    };
    (first, last)
}

/// Number of values `first, first + interval, ...` that do not exceed `last`.
fn stride_count(first: f64, last: f64, interval: f64) -> usize {
    if interval <= 0.0 || first > last {
        return 0;
    }
    let mut count = 0usize;
    while first + count as f64 * interval <= last {
        count += 1;
    }
    count
}

fn accumulate(
    min: f64,
    max: f64,
    mut interval: f64,
    params: &IntervalParams,
    trailing_half_step: bool,
) -> AxisValues {
    let label_count = params.label_count;
    let mut n = usize::from(params.center_labels);
    let mut entries = Vec::with_capacity(label_count + 1);

    if params.force_label_count {
        interval = (max - min).abs() / (label_count as f64 - 1.0);

        let mut v = min;
        for _ in 0..label_count {
            entries.push(v);
            v += interval;
        }
        n = label_count;
    } else {
        let (first, last) = first_and_last(min, max, interval, params.center_labels);

        if interval != 0.0 && last != first {
            n += stride_count(first, last, interval);
        } else if last == first && n == 0 {
            n = 1;
        }

        let mut f = first;
        for _ in 0..n {
            if f == 0.0 {
                // fold -0
                f = 0.0;
            }
            entries.push(f);
            f += interval;
        }

        if trailing_half_step {
            entries.push(f + interval / 2.0);
        }
    }

    let centered_entries = if params.center_labels {
        let offset = interval / 2.0;
        entries.iter().take(n).map(|e| e + offset).collect()
    } else {
        Vec::new()
    };

    AxisValues {
        entries,
        centered_entries,
        decimals: interval_decimals(interval),
        interval,
        axis_range_override: None,
    }
}

fn radar(min: f64, max: f64, interval: f64, range: f64, params: &IntervalParams) -> AxisValues {
    let label_count = params.label_count;
    let mut n = usize::from(params.center_labels);

    let entries: Vec<f64> = if params.force_label_count {
        let step = range / (label_count as f64 - 1.0);
        n = label_count;
        // a single label has an infinite step; k = 0 must not multiply it
        (0..label_count)
            .map(|k| if k == 0 { min } else { min + k as f64 * step })
            .collect()
    } else {
        let (first, last) = first_and_last(min, max, interval, params.center_labels);
        if interval != 0.0 {
            n += stride_count(first, last, interval);
        }
        n += 1;
        (0..n).map(|k| first + k as f64 * interval).collect()
    };

    let centered_entries = if params.center_labels {
        let offset = match entries.as_slice() {
            [a, b, ..] => (b - a) / 2.0,
            _ => interval / 2.0,
        };
        entries.iter().map(|e| e + offset).collect()
    } else {
        Vec::new()
    };

    let axis_range_override = match (entries.first(), entries.get(n.saturating_sub(1))) {
        (Some(&lo), Some(&hi)) => Some((lo, hi)),
        _ => None,
    };

    AxisValues {
        entries,
        centered_entries,
        decimals: interval_decimals(interval),
        interval,
        axis_range_override,
    }
}
