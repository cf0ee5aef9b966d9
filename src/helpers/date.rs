//! Date helper functions

use chrono::NaiveDateTime;

/// Format a date in full month style
///
/// # Examples
/// ```ignore
/// long_date(&date) // -> "March 4, 2024"
/// ```
pub fn long_date(date: &NaiveDateTime) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Format a date as an ISO calendar day, for `<time datetime>` attributes
pub fn iso_date(date: &NaiveDateTime) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_long_date() {
        assert_eq!(long_date(&date(2024, 3, 4)), "March 4, 2024");
        assert_eq!(long_date(&date(2023, 12, 25)), "December 25, 2023");
    }

    #[test]
    fn test_iso_date() {
        assert_eq!(iso_date(&date(2024, 3, 4)), "2024-03-04");
    }
}
