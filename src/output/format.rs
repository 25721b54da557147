//! `%.15g`-style number formatting.
//!
//! Fixed notation is used when the decimal exponent lies in
//! `[-4, precision)`, scientific otherwise; trailing zeros are stripped in
//! both. Exponents carry a sign and at least two digits (`1e-05`).

use crate::utils::config::OUTPUT_PRECISION;

/// Format with [`OUTPUT_PRECISION`] significant digits
pub fn format_g(x: f64) -> String {
    format_g_with(x, OUTPUT_PRECISION)
}

/// Format `x` like C's `%.{precision}g`
pub fn format_g_with(x: f64, precision: usize) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let precision = precision.max(1);

    if x == 0.0 {
        return if x.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // Scientific rendering decides the exponent after rounding
    let sci = format!("{:.*e}", precision - 1, x);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if exp < -4 || exp >= precision as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", strip_trailing_zeros(mantissa), sign, exp.abs())
    } else {
        let decimals = (precision as i32 - 1 - exp).max(0) as usize;
        strip_trailing_zeros(&format!("{:.*}", decimals, x)).to_string()
    }
}

fn strip_trailing_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fixed_notation() {
        assert_eq!(format_g(0.1), "0.1");
        assert_eq!(format_g(6.0), "6");
        assert_eq!(format_g(-2.5), "-2.5");
        assert_eq!(format_g(2.0 / 3.0), "0.666666666666667");
        assert_eq!(format_g(1e14), "100000000000000");
        assert_eq!(format_g(0.0001), "0.0001");
        assert_eq!(format_g(7.242_640_687_119_285), "7.24264068711929");
    }

    #[test]
    fn test_scientific_notation() {
        assert_eq!(format_g(1e-5), "1e-05");
        assert_eq!(format_g(1.5e20), "1.5e+20");
        assert_eq!(format_g(1e15), "1e+15");
        assert_eq!(format_g(123_456_789_012_345_678.0), "1.23456789012346e+17");
        assert_eq!(format_g(-3.25e-7), "-3.25e-07");
        assert_eq!(format_g(1e100), "1e+100");
    }

    #[test]
    fn test_rounding_moves_exponent() {
        assert_eq!(format_g(9.999_999_999_999_998), "10");
        assert_eq!(format_g_with(0.000_099_999_9, 3), "0.0001");
    }

    #[test]
    fn test_special_values() {
        assert_eq!(format_g(0.0), "0");
        assert_eq!(format_g(-0.0), "-0");
        assert_eq!(format_g(f64::NAN), "nan");
        assert_eq!(format_g(f64::INFINITY), "inf");
        assert_eq!(format_g(f64::NEG_INFINITY), "-inf");
    }
}
