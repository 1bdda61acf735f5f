//! Display formatting of counter values.

/// Format a displayed counter value.
///
/// Integral values get thousand separators; fractional ones (from
/// `Rounding::None`) keep two decimals.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        let int = value as i64;
        let digits = format_number(int.unsigned_abs());
        if int < 0 {
            format!("-{digits}")
        } else {
            digits
        }
    } else {
        format!("{value:.2}")
    }
}

/// Format a number with thousand separators.
#[must_use]
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}
