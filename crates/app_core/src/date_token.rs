//! Date token substitution for date tabs
//!
//! A pattern such as `YYYY_MM` is rewritten with the digits of a timestamp.
//! Each placeholder letter (`Y`, `M`, `D`) is filled on its own, from the
//! rightmost occurrence leftwards, taking the field's digits from the least
//! significant one. Occurrences left over once the digits run out become `0`.
//! All dates are taken on the UTC calendar.

use chrono::{DateTime, Datelike, Utc};
use std::path::Path;
use std::time::SystemTime;

/// Resolve `pattern` against `timestamp`.
pub fn substitute(pattern: &str, timestamp: DateTime<Utc>) -> String {
    let year = format!("{:04}", timestamp.year());
    let month = format!("{:02}", timestamp.month());
    let day = format!("{:02}", timestamp.day());

    let mut year_digits = year.chars().rev();
    let mut month_digits = month.chars().rev();
    let mut day_digits = day.chars().rev();

    let mut resolved: Vec<char> = pattern
        .chars()
        .rev()
        .map(|c| match c {
            'Y' => year_digits.next().unwrap_or('0'),
            'M' => month_digits.next().unwrap_or('0'),
            'D' => day_digits.next().unwrap_or('0'),
            other => other,
        })
        .collect();
    resolved.reverse();

    resolved.into_iter().collect()
}

/// Last modification time of `path` on the UTC calendar
pub fn modified_utc(path: &Path) -> std::io::Result<DateTime<Utc>> {
    let modified: SystemTime = std::fs::metadata(path)?.modified()?;
    Ok(DateTime::<Utc>::from(modified))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn march_7_2023() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 3, 7, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_full_date() {
        assert_eq!(substitute("YYYY_MM_DD", march_7_2023()), "2023_03_07");
        assert_eq!(substitute("YYYY_MM", march_7_2023()), "2023_03");
    }

    #[test]
    fn test_short_fields_take_low_digits() {
        assert_eq!(substitute("YY_M", march_7_2023()), "23_3");
        assert_eq!(substitute("D", march_7_2023()), "7");
    }

    #[test]
    fn test_long_fields_pad_with_zeros() {
        assert_eq!(substitute("YYYYYY", march_7_2023()), "002023");
        assert_eq!(substitute("MMMM", march_7_2023()), "0003");
    }

    #[test]
    fn test_literal_pattern_unchanged() {
        for pattern in ["", "holiday", "trip-2023", "a_b c", "yyyy_mm"] {
            assert_eq!(substitute(pattern, march_7_2023()), pattern);
        }
    }

    #[test]
    fn test_letters_fill_independently() {
        // Each letter class is filled on its own, whatever the visual order
        assert_eq!(substitute("YYYY-DD-MM", march_7_2023()), "2023-07-03");
        assert_eq!(substitute("YMYDY", march_7_2023()), "03273");
    }

    #[test]
    fn test_literal_text_around_placeholders() {
        assert_eq!(substitute("vacances YYYY", march_7_2023()), "vacances 2023");
    }

    #[test]
    fn test_uses_utc_calendar() {
        // 2023-12-31T23:30:00-02:00 is already January 1st in UTC
        let late = chrono::FixedOffset::west_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2023, 12, 31, 23, 30, 0)
            .unwrap();
        assert_eq!(substitute("YYYY_MM_DD", late.with_timezone(&Utc)), "2024_01_01");
    }

    #[test]
    fn test_modified_utc_reads_mtime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        std::fs::write(&path, b"").unwrap();
        let mtime = filetime::FileTime::from_unix_time(march_7_2023().timestamp(), 0);
        filetime::set_file_mtime(&path, mtime).unwrap();

        assert_eq!(modified_utc(&path).unwrap(), march_7_2023());
        assert!(modified_utc(&dir.path().join("missing.jpg")).is_err());
    }
}
