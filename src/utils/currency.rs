//! Price formatting for reseller quotes.

/// Formats an amount as US dollars with two decimals and comma thousands
/// separators.
///
/// Non-finite amounts format as zero.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(format_price(12.5), "$12.50");
/// assert_eq!(format_price(1234.0), "$1,234.00");
/// ```
pub fn format_price(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };

    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };

    format!(
        "${}{}.{:02}",
        sign,
        group_thousands(cents / 100),
        cents % 100
    )
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_decimals() {
        assert_eq!(format_price(12.5), "$12.50");
        assert_eq!(format_price(9.99), "$9.99");
        assert_eq!(format_price(10.0), "$10.00");
        assert_eq!(format_price(0.0), "$0.00");
    }

    #[test]
    fn test_rounding() {
        assert_eq!(format_price(8.999), "$9.00");
        assert_eq!(format_price(0.004), "$0.00");
    }

    #[test]
    fn test_thousands_separator() {
        assert_eq!(format_price(1234.0), "$1,234.00");
        assert_eq!(format_price(1234567.891), "$1,234,567.89");
        assert_eq!(format_price(999.0), "$999.00");
    }

    #[test]
    fn test_non_finite_and_negative() {
        assert_eq!(format_price(f64::NAN), "$0.00");
        assert_eq!(format_price(f64::INFINITY), "$0.00");
        assert_eq!(format_price(-5.0), "$-5.00");
    }
}
