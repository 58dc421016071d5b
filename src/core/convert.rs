//! Amount parsing and result formatting.

pub const LOADING_PLACEHOLDER: &str = "Loading...";

/// Parses the amount typed by the user.
///
/// Leading whitespace is skipped and the longest numeric prefix is used, so
/// `"12abc"` reads as 12. Anything without a numeric prefix reads as 0.
pub fn parse_amount(input: &str) -> f64 {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return 0.0;
    }
    // Exponent only counts when followed by at least one digit.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().unwrap_or(0.0)
}

/// `amount × rate` rounded to two decimals. A missing rate counts as zero.
pub fn convert(amount: &str, rate: Option<f64>) -> String {
    let value = parse_amount(amount) * rate.unwrap_or(0.0);
    let formatted = format!("{value:.2}");
    // Negative zero is shown as "0.00".
    if formatted == "-0.00" {
        "0.00".to_string()
    } else {
        formatted
    }
}

/// The result line shown under the inputs.
pub fn result_line(amount: &str, from: &str, to: &str, rate: Option<f64>, loading: bool) -> String {
    if loading {
        return LOADING_PLACEHOLDER.to_string();
    }
    format!("{} {} = {} {}", amount, from, convert(amount, rate), to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1"), 1.0);
        assert_eq!(parse_amount("  2.5"), 2.5);
        assert_eq!(parse_amount("12abc"), 12.0);
        assert_eq!(parse_amount(".5"), 0.5);
        assert_eq!(parse_amount("3."), 3.0);
        assert_eq!(parse_amount("-4"), -4.0);
        assert_eq!(parse_amount("1e3"), 1000.0);
        assert_eq!(parse_amount("2e"), 2.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("."), 0.0);
        assert_eq!(parse_amount("-"), 0.0);
    }

    #[test]
    fn test_convert_unit_rate() {
        assert_eq!(convert("1", Some(1.0)), "1.00");
    }

    #[test]
    fn test_convert_rounds_to_two_decimals() {
        assert_eq!(convert("100", Some(1.08766)), "108.77");
        assert_eq!(convert("3", Some(0.3333)), "1.00");
    }

    #[test]
    fn test_convert_non_numeric_amount_is_zero() {
        assert_eq!(convert("abc", Some(1.2)), "0.00");
    }

    #[test]
    fn test_convert_never_shows_negative_zero() {
        assert_eq!(convert("-0.001", Some(1.0)), "0.00");
        assert_eq!(convert("-1", Some(0.0)), "0.00");
        assert_eq!(convert("-1", Some(1.0)), "-1.00");
    }

    #[test]
    fn test_convert_missing_rate_is_zero() {
        assert_eq!(convert("250", None), "0.00");
    }

    #[test]
    fn test_result_line() {
        assert_eq!(
            result_line("10", "EUR", "USD", Some(1.1), false),
            "10 EUR = 11.00 USD"
        );
        assert_eq!(
            result_line("10", "EUR", "USD", Some(1.1), true),
            LOADING_PLACEHOLDER
        );
        assert_eq!(result_line("x", "EUR", "JPY", None, false), "x EUR = 0.00 JPY");
    }
}
