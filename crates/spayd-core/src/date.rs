//! Due-date formatting for the `DT` attribute.

use chrono::{Datelike, NaiveDate};

/// Format a date as `YYYYMMDD`.
///
/// The year is left-padded with zeros to four characters; longer years are
/// written in full and a negative year keeps its sign (`-5` -> `00-5`).
pub fn format_date(date: NaiveDate) -> String {
    format!(
        "{:0>4}{:02}{:02}",
        date.year().to_string(),
        date.month(),
        date.day()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pads_components() {
        let date = NaiveDate::from_ymd_opt(2018, 4, 20).unwrap();
        assert_eq!(format_date(date), "20180420");

        let early = NaiveDate::from_ymd_opt(987, 1, 5).unwrap();
        assert_eq!(format_date(early), "09870105");
    }

    #[test]
    fn test_format_years_outside_four_digits() {
        let far = NaiveDate::from_ymd_opt(10000, 1, 1).unwrap();
        assert_eq!(format_date(far), "100000101");

        let negative = NaiveDate::from_ymd_opt(-5, 3, 9).unwrap();
        assert_eq!(format_date(negative), "00-50309");

        let long_negative = NaiveDate::from_ymd_opt(-2024, 12, 31).unwrap();
        assert_eq!(format_date(long_negative), "-20241231");
    }
}
