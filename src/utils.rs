use gpui::Pixels;

pub mod date_formatter;
pub mod value_formatter;

pub trait PixelsExt {
    fn as_f32(&self) -> f32;
    fn as_f64(&self) -> f64;
}

impl PixelsExt for Pixels {
    fn as_f32(&self) -> f32 {
        f32::from(*self)
    }

    fn as_f64(&self) -> f64 {
        f32::from(*self) as f64
    }
}

/// Rounds to one significant digit, half away from zero. Zero, NaN and
/// infinities come back unchanged.
pub fn round_to_next_significant(number: f64) -> f64 {
    if number == 0.0 || !number.is_finite() {
        return number;
    }
    let d = number.abs().log10().ceil();
    let pw = 1 - d as i32;
    let magnitude = 10f64.powi(pw);
    (number * magnitude).round() / magnitude
}

/// Smallest f64 greater than `x`.
pub fn next_up(x: f64) -> f64 {
    if x.is_nan() || x == f64::INFINITY {
        return x;
    }
    if x == 0.0 {
        return f64::from_bits(1);
    }
    let bits = x.to_bits();
    if x > 0.0 {
        f64::from_bits(bits + 1)
    } else {
        f64::from_bits(bits - 1)
    }
}

/// Decimal places needed to tell labels `interval` apart.
pub fn interval_decimals(interval: f64) -> usize {
    if interval > 0.0 && interval < 1.0 {
        (-interval.log10()).ceil() as usize
    } else {
        0
    }
}
