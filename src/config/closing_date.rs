use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Last day on which a submission counts towards an event.
///
/// The cutoff is inclusive: anything submitted before midnight UTC at the
/// start of the following day is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClosingDate(NaiveDate);

impl ClosingDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// First instant that is no longer accepted.
    pub fn boundary(&self) -> DateTime<Utc> {
        let next_day = self.0.checked_add_days(Days::new(1)).unwrap_or(NaiveDate::MAX);
        next_day.and_time(chrono::NaiveTime::MIN).and_utc()
    }

    /// Whether a submission made at `at` is still within the event window.
    pub fn accepts(&self, at: DateTime<Utc>) -> bool {
        at < self.boundary()
    }
}

impl fmt::Display for ClosingDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl Serialize for ClosingDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ClosingDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
            .map(ClosingDate)
            .map_err(|e| {
                serde::de::Error::custom(format!("invalid closing date '{}': {}", raw, e))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn closing(y: i32, m: u32, d: u32) -> ClosingDate {
        ClosingDate::new(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_boundary_is_start_of_next_day() {
        let date = closing(2025, 3, 31);
        assert_eq!(
            date.boundary(),
            Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_accepts_whole_closing_day() {
        let date = closing(2025, 3, 31);
        assert!(date.accepts(Utc.with_ymd_and_hms(2025, 3, 31, 0, 0, 0).unwrap()));
        assert!(date.accepts(Utc.with_ymd_and_hms(2025, 3, 31, 23, 59, 59).unwrap()));
        assert!(date.accepts(Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()));
    }

    #[test]
    fn test_rejects_from_next_day() {
        let date = closing(2025, 3, 31);
        assert!(!date.accepts(Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap()));
        assert!(!date.accepts(Utc.with_ymd_and_hms(2025, 4, 1, 10, 30, 0).unwrap()));
    }

    #[test]
    fn test_display_matches_config_format() {
        assert_eq!(closing(2025, 1, 5).to_string(), "2025-01-05");
    }

    #[test]
    fn test_invalid_date_rejected() {
        let result: Result<ClosingDate, _> = serde_saphyr::from_str("\"31/03/2025\"");
        assert!(result.is_err());
    }
}
