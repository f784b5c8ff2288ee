use super::date_formatter::{determine_date_format, format_timestamp};
use crate::data_types::TimeUnit;
use serde::{Deserialize, Serialize};

/// Turns axis entries into label text.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Default)]
pub enum AxisValueFormatter {
    /// Fixed decimals taken from the axis interval.
    #[default]
    Decimals,
    /// Timestamps in the given unit; the format follows the axis span.
    Time(TimeUnit),
    Percent,
}

impl AxisValueFormatter {
    pub fn format(&self, value: f64, decimals: usize, axis_span: f64) -> String {
        // -0 would print as "-0"
        let value = if value == 0.0 { 0.0 } else { value };
        match self {
            AxisValueFormatter::Decimals => format!("{:.*}", decimals, value),
            AxisValueFormatter::Percent => format!("{:.*} %", decimals, value),
            AxisValueFormatter::Time(unit) => {
                let fmt = determine_date_format(unit.to_seconds(axis_span));
                format_timestamp(value, fmt, *unit)
            }
        }
    }
}
