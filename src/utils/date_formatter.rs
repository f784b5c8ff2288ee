use crate::data_types::TimeUnit;
use chrono::DateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmartDateFormat {
    Year,       // 2024
    MonthYear,  // Jan 2024
    DayMonth,   // 12 Jan
    HourMin,    // 10:30
    HourMinSec, // 10:30:15
    Millis,     // 10:30:15.250
}

/// Picks a label format from the span of the axis, in seconds.
pub fn determine_date_format(span_sec: f64) -> SmartDateFormat {
    const MINUTE: f64 = 60.0;
    const HOUR: f64 = 3600.0;
    const DAY: f64 = 24.0 * HOUR;
    const MONTH: f64 = 30.0 * DAY;
    const YEAR: f64 = 365.0 * DAY;

    match span_sec.abs() {
        s if s > YEAR * 2.0 => SmartDateFormat::Year,
        s if s > MONTH * 2.0 => SmartDateFormat::MonthYear,
        s if s > DAY * 1.5 => SmartDateFormat::DayMonth,
        s if s > MINUTE * 5.0 => SmartDateFormat::HourMin,
        s if s > 5.0 => SmartDateFormat::HourMinSec,
        _ => SmartDateFormat::Millis,
    }
}

/// Formats an axis value holding a timestamp in `unit`. Values outside the
/// representable date range fall back to plain decimals.
pub fn format_timestamp(value: f64, format: SmartDateFormat, unit: TimeUnit) -> String {
    let seconds = unit.to_seconds(value);
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9).round().min(999_999_999.0) as u32;

    let Some(dt) = DateTime::from_timestamp(whole as i64, nanos) else {
        return format!("{:.2}", value);
    };

    let pattern = match format {
        SmartDateFormat::Year => "%Y",
        SmartDateFormat::MonthYear => "%b %Y",
        SmartDateFormat::DayMonth => "%d %b",
        SmartDateFormat::HourMin => "%H:%M",
        SmartDateFormat::HourMinSec => "%H:%M:%S",
        SmartDateFormat::Millis => "%H:%M:%S%.3f",
    };
    dt.format(pattern).to_string()
}
