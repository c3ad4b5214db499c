/// Significant digits of printed coordinates.
pub const FLOAT_PRECISION: usize = 8;

/// Formats a float with [`FLOAT_PRECISION`] significant digits in the style of C's `%g`.
///
/// Scientific notation is used for very small and very large magnitudes,
/// trailing zeros are dropped.
///
/// # Examples
///
/// ```
/// use chronobox_datatypes::codec::format_float;
///
/// assert_eq!(format_float(1.0), "1");
/// assert_eq!(format_float(-2.5), "-2.5");
/// assert_eq!(format_float(1.0 / 3.0), "0.33333333");
/// assert_eq!(format_float(123_456_789.0), "1.2345679e+08");
/// assert_eq!(format_float(0.000_012_5), "1.25e-05");
/// ```
pub fn format_float(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    let scientific = format!("{:.*e}", FLOAT_PRECISION - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return scientific;
    };

    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    let precision = FLOAT_PRECISION as i32;

    if exponent < -4 || exponent >= precision {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            trim_fraction(mantissa),
            exponent.unsigned_abs()
        )
    } else {
        #[allow(clippy::cast_sign_loss)]
        let decimals = (precision - 1 - exponent) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_notation() {
        assert_eq!(format_float(0.0), "0");
        assert_eq!(format_float(-0.0), "0");
        assert_eq!(format_float(10.0), "10");
        assert_eq!(format_float(12_345_678.0), "12345678");
        assert_eq!(format_float(0.0001), "0.0001");
        assert_eq!(format_float(-1.25), "-1.25");
        assert_eq!(format_float(99.999_999_9), "100");
    }

    #[test]
    fn scientific_notation() {
        assert_eq!(format_float(100_000_000.0), "1e+08");
        assert_eq!(format_float(0.000_01), "1e-05");
        assert_eq!(format_float(-6.02e23), "-6.02e+23");
        assert_eq!(format_float(1.5e-300), "1.5e-300");
    }

    #[test]
    fn eight_significant_digits() {
        assert_eq!(format_float(std::f64::consts::PI), "3.1415927");
        assert_eq!(format_float(123.456_789_123), "123.45679");
    }

    #[test]
    fn printed_values_parse_back() {
        for value in [1.0, -3.5, 0.125, 1e-7, 4.2e12, 12_345_678.0] {
            assert_eq!(format_float(value).parse::<f64>().unwrap(), value);
        }
    }
}
