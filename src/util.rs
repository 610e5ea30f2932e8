use chrono::NaiveDate;

/// Extracts the leading `YYYY-MM-DD` of a remote timestamp string.
/// Time-of-day and zone are ignored, so window comparisons can be out
/// by up to a day.
pub fn parse_authored_date(raw: &str) -> Option<NaiveDate> {
    let prefix = raw.get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_date_prefix_and_ignores_the_rest() {
        assert_eq!(
            parse_authored_date("2026-08-04T12:30:00-07:00"),
            NaiveDate::from_ymd_opt(2026, 8, 4)
        );
        assert_eq!(
            parse_authored_date("2026-08-04"),
            NaiveDate::from_ymd_opt(2026, 8, 4)
        );
    }

    #[test]
    fn rejects_malformed_dates() {
        assert_eq!(parse_authored_date(""), None);
        assert_eq!(parse_authored_date("yesterday"), None);
        assert_eq!(parse_authored_date("2026/08/04"), None);
        assert_eq!(parse_authored_date("2026-13-04T00:00:00Z"), None);
    }
}
