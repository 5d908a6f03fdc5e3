//! Time utilities: export timestamps and month grouping keys.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Key used for records without a date. Sorts after every `YYYY-MM` key.
pub const UNKNOWN_MONTH: &str = "Unknown";

/// Parse an export timestamp like "2024-03-15 10:30" (time optional) as local time.
///
/// Returns `None` for empty input, non-numeric components, or values that
/// are not a real calendar date or clock time. Seconds, if present, are dropped.
pub fn parse_export_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    // Only the first two space-separated pieces count; an empty second
    // piece (double space) means midnight
    let mut pieces = raw.split(' ');
    let date_part = pieces.next().unwrap_or("");
    let time_part = pieces.next().unwrap_or("");

    let [year, month, day] = numeric_parts::<3>(date_part, '-')?;
    let date = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)?;

    if time_part.is_empty() {
        return date.and_hms_opt(0, 0, 0);
    }

    let [hour, minute] = match numeric_parts::<2>(time_part, ':') {
        Some(hm) => hm,
        None => {
            // HH:MM:SS
            let [h, m, _] = numeric_parts::<3>(time_part, ':')?;
            [h, m]
        }
    };
    date.and_hms_opt(hour, minute, 0)
}

/// Split `s` on `sep` into exactly `N` all-digit components.
fn numeric_parts<const N: usize>(s: &str, sep: char) -> Option<[u32; N]> {
    let mut out = [0u32; N];
    let mut it = s.split(sep);
    for slot in out.iter_mut() {
        let part = it.next()?;
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        *slot = part.parse().ok()?;
    }
    if it.next().is_some() {
        return None;
    }
    Some(out)
}

/// Grouping key `YYYY-MM` with a zero-padded month, or [`UNKNOWN_MONTH`].
pub fn month_key(date: Option<NaiveDateTime>) -> String {
    match date {
        Some(d) => format!("{}-{:02}", d.year(), d.month()),
        None => UNKNOWN_MONTH.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_date_and_time() {
        assert_eq!(
            parse_export_datetime("2024-03-15 10:30"),
            Some(dt(2024, 3, 15, 10, 30))
        );
    }

    #[test]
    fn test_parse_date_only_defaults_to_midnight() {
        assert_eq!(
            parse_export_datetime("2024-03-15"),
            Some(dt(2024, 3, 15, 0, 0))
        );
    }

    #[test]
    fn test_parse_drops_seconds() {
        assert_eq!(
            parse_export_datetime("2024-03-15 10:30:59"),
            Some(dt(2024, 3, 15, 10, 30))
        );
    }

    #[test]
    fn test_parse_double_space_means_midnight() {
        assert_eq!(
            parse_export_datetime("2024-03-15  10:30"),
            Some(dt(2024, 3, 15, 0, 0))
        );
        assert_eq!(
            parse_export_datetime("2024-03-15 10:30 UTC"),
            Some(dt(2024, 3, 15, 10, 30))
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_export_datetime(""), None);
        assert_eq!(parse_export_datetime("   "), None);
        assert_eq!(parse_export_datetime("yesterday"), None);
        assert_eq!(parse_export_datetime("2024-xx-15"), None);
        assert_eq!(parse_export_datetime("2024-03"), None);
        assert_eq!(parse_export_datetime("2024-13-01"), None);
        assert_eq!(parse_export_datetime("2024-02-30"), None);
        assert_eq!(parse_export_datetime("2024-03-15 noon"), None);
        assert_eq!(parse_export_datetime("2024-03-15 25:00"), None);
    }

    #[test]
    fn test_month_key() {
        assert_eq!(month_key(Some(dt(2024, 3, 15, 10, 30))), "2024-03");
        assert_eq!(month_key(Some(dt(2023, 11, 1, 0, 0))), "2023-11");
        assert_eq!(month_key(None), "Unknown");
    }

    #[test]
    fn test_unknown_sorts_after_dated_keys() {
        let mut keys = vec![
            UNKNOWN_MONTH.to_string(),
            "2024-01".to_string(),
            "2023-12".to_string(),
        ];
        keys.sort();
        assert_eq!(keys, vec!["2023-12", "2024-01", "Unknown"]);
    }
}
