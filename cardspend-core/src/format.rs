//! Display formatting for amounts, month keys and dates (en-US).

use chrono::NaiveDateTime;
use numfmt::{Formatter, Precision};
use std::sync::OnceLock;

use crate::time::UNKNOWN_MONTH;

/// Short month names indexed by 0-based month
pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Format a USD amount like `$1,234.56`, or `-$42.10` for negatives.
pub fn format_currency(amount: f64) -> String {
    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();
    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| currency_formatter("$"));
    let negative_fmt = NEGATIVE_FMT.get_or_init(|| currency_formatter("-$"));

    // Round to cents first so tiny negatives do not print as "-$0.00"
    let cents = (amount * 100.0).round() / 100.0;
    let formatted = if cents < 0.0 {
        negative_fmt.fmt_string(cents.abs())
    } else if cents > 0.0 {
        positive_fmt.fmt_string(cents)
    } else {
        // numfmt renders zero as a bare "0"
        return "$0.00".to_string();
    };
    pad_cents(formatted)
}

fn currency_formatter(prefix: &str) -> Formatter {
    Formatter::currency(prefix)
        .unwrap_or_else(|_| Formatter::new())
        .precision(Precision::Decimals(2))
}

// numfmt drops trailing zeros ("12.30" becomes "12.3"), so put them back
fn pad_cents(mut s: String) -> String {
    match s.rfind('.') {
        Some(dot) => {
            for _ in s.len() - dot - 1..2 {
                s.push('0');
            }
        }
        None => s.push_str(".00"),
    }
    s
}

/// Turn a `YYYY-MM` key into a label like `Mar 2024`.
///
/// `Unknown` and anything unparseable are returned unchanged.
pub fn format_month_label(key: &str) -> String {
    if key == UNKNOWN_MONTH {
        return key.to_string();
    }
    let parsed = key.split_once('-').and_then(|(y, m)| {
        let year: i32 = y.parse().ok()?;
        let month: usize = m.parse().ok()?;
        let name = MONTH_NAMES.get(month.checked_sub(1)?)?;
        Some(format!("{name} {year}"))
    });
    parsed.unwrap_or_else(|| key.to_string())
}

/// Format a timestamp like `Mar 15, 2024`, or `-` when absent.
pub fn format_date(date: Option<NaiveDateTime>) -> String {
    match date {
        Some(d) => d.format("%b %-d, %Y").to_string(),
        None => "-".to_string(),
    }
}

/// Month name for a 0-based month, `?` when out of range.
pub fn month_name(month0: u32) -> &'static str {
    MONTH_NAMES.get(month0 as usize).copied().unwrap_or("?")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(120.5), "$120.50");
        assert_eq!(format_currency(1234.567), "$1,234.57");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_currency(-42.1), "-$42.10");
        assert_eq!(format_currency(-0.001), "$0.00");
    }

    #[test]
    fn test_format_currency_pads_cents() {
        assert_eq!(format_currency(12.3), "$12.30");
        assert_eq!(format_currency(7.0), "$7.00");
        assert_eq!(format_currency(-1234.0), "-$1,234.00");
        assert_eq!(format_currency(0.004), "$0.00");
    }

    #[test]
    fn test_format_month_label() {
        assert_eq!(format_month_label("2024-03"), "Mar 2024");
        assert_eq!(format_month_label("2023-12"), "Dec 2023");
        assert_eq!(format_month_label("Unknown"), "Unknown");
        assert_eq!(format_month_label("2024-13"), "2024-13");
    }

    #[test]
    fn test_format_date() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(10, 30, 0);
        assert_eq!(format_date(d), "Mar 5, 2024");
        assert_eq!(format_date(None), "-");
    }

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(0), "Jan");
        assert_eq!(month_name(11), "Dec");
        assert_eq!(month_name(12), "?");
    }
}
