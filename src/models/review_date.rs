use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Normalized `last_review` value.
///
/// Unparsable and empty cells both become `Invalid`, which is written back
/// as an empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewDate {
    Parsed(NaiveDateTime),
    Invalid,
}

impl ReviewDate {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return ReviewDate::Invalid;
        }

        for format in DATETIME_FORMATS {
            if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
                return ReviewDate::Parsed(datetime);
            }
        }

        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                return ReviewDate::Parsed(date.and_time(NaiveTime::MIN));
            }
        }

        ReviewDate::Invalid
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ReviewDate::Parsed(_))
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            ReviewDate::Parsed(datetime) => Some(datetime.date()),
            ReviewDate::Invalid => None,
        }
    }

    /// Canonical text form: `YYYY-MM-DD`, with a time part only when one is set.
    pub fn to_canonical_string(&self) -> String {
        match self {
            ReviewDate::Parsed(datetime) if datetime.time() == NaiveTime::MIN => {
                datetime.format("%Y-%m-%d").to_string()
            }
            ReviewDate::Parsed(datetime) => datetime.format("%Y-%m-%d %H:%M:%S%.f").to_string(),
            ReviewDate::Invalid => String::new(),
        }
    }
}

impl fmt::Display for ReviewDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_canonical_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_date() {
        let date = ReviewDate::parse("2019-05-01");
        assert!(date.is_valid());
        assert_eq!(date.date(), NaiveDate::from_ymd_opt(2019, 5, 1));
        assert_eq!(date.to_canonical_string(), "2019-05-01");
    }

    #[test]
    fn test_parse_alternative_date_layouts() {
        let expected = NaiveDate::from_ymd_opt(2019, 5, 1);
        assert_eq!(ReviewDate::parse("2019/05/01").date(), expected);
        assert_eq!(ReviewDate::parse("05/01/2019").date(), expected);
        assert_eq!(ReviewDate::parse(" 2019-05-01 ").date(), expected);
    }

    #[test]
    fn test_parse_datetime_keeps_time() {
        let date = ReviewDate::parse("2019-05-01 13:45:00");
        assert!(date.is_valid());
        assert_eq!(date.to_canonical_string(), "2019-05-01 13:45:00");

        let iso = ReviewDate::parse("2019-05-01T13:45:00");
        assert_eq!(iso, date);
    }

    #[test]
    fn test_midnight_datetime_renders_as_date() {
        let date = ReviewDate::parse("2019-05-01 00:00:00");
        assert_eq!(date.to_canonical_string(), "2019-05-01");
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(ReviewDate::parse("not-a-date"), ReviewDate::Invalid);
        assert_eq!(ReviewDate::parse(""), ReviewDate::Invalid);
        assert_eq!(ReviewDate::parse("2019-13-45"), ReviewDate::Invalid);
        assert_eq!(ReviewDate::Invalid.to_canonical_string(), "");
    }

    #[test]
    fn test_canonical_form_reparses_to_same_value() {
        for raw in ["2019-05-01", "2019-05-01 13:45:00", "not-a-date"] {
            let first = ReviewDate::parse(raw);
            let second = ReviewDate::parse(&first.to_canonical_string());
            assert_eq!(first, second);
        }
    }
}
