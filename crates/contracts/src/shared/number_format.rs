//! Brazilian number formatting: `.` groups thousands, `,` separates decimals.

/// Formats a number with thousands grouping and the given number of decimals.
///
/// ```
/// use contracts::shared::number_format::format_decimal_br;
/// assert_eq!(format_decimal_br(1234.567, 2), "1.234,57");
/// ```
pub fn format_decimal_br(value: f64, decimals: u8) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let formatted = format!("{:.*}", decimals as usize, value);

    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (formatted.as_str(), None),
    };
    let (negative, digits) = match integer_part.strip_prefix('-') {
        Some(d) => (true, d),
        None => (false, integer_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let mut result: String = grouped.chars().rev().collect();

    // "-0,00" reads as noise in a table
    let is_zero = result.chars().all(|c| c == '0' || c == '.')
        && decimal_part.map_or(true, |d| d.chars().all(|c| c == '0'));
    if negative && !is_zero {
        result.insert(0, '-');
    }

    match decimal_part {
        Some(d) => format!("{},{}", result, d),
        None => result,
    }
}

/// Integer with thousands grouping: `1234567.0` -> `"1.234.567"`.
pub fn format_int_br(value: f64) -> String {
    format_decimal_br(value, 0)
}

/// Currency in reais: `1234.5` -> `"R$ 1.234,50"`, negatives as `"-R$ 1.234,50"`.
pub fn format_brl(value: f64) -> String {
    let formatted = format_decimal_br(value, 2);
    match formatted.strip_prefix('-') {
        Some(abs) => format!("-R$ {}", abs),
        None => format!("R$ {}", formatted),
    }
}

/// Ratio as percentage: `0.7` -> `"70,00%"`.
pub fn format_percent_br(ratio: f64) -> String {
    format!("{}%", format_decimal_br(ratio * 100.0, 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_decimal_br() {
        assert_eq!(format_decimal_br(1234.567, 0), "1.235");
        assert_eq!(format_decimal_br(1234.567, 1), "1.234,6");
        assert_eq!(format_decimal_br(1234.567, 2), "1.234,57");
        assert_eq!(format_decimal_br(1234.567, 3), "1.234,567");
        assert_eq!(format_decimal_br(0.0, 2), "0,00");
        assert_eq!(format_decimal_br(-0.001, 2), "0,00");
        assert_eq!(format_decimal_br(f64::NAN, 2), "0,00");
    }

    #[test]
    fn test_format_int_br() {
        assert_eq!(format_int_br(1234567.0), "1.234.567");
        assert_eq!(format_int_br(999.0), "999");
        assert_eq!(format_int_br(-1234.0), "-1.234");
    }

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(1234.56), "R$ 1.234,56");
        assert_eq!(format_brl(1234567.891), "R$ 1.234.567,89");
        assert_eq!(format_brl(-1234.5), "-R$ 1.234,50");
        assert_eq!(format_brl(0.0), "R$ 0,00");
    }

    #[test]
    fn test_format_percent_br() {
        assert_eq!(format_percent_br(0.7), "70,00%");
        assert_eq!(format_percent_br(0.1234), "12,34%");
    }
}
