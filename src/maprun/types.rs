use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::league::RawResult;

#[derive(Debug, Deserialize, Serialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub results: Vec<ApiResult>,
}

/// One row of the MapRun public results endpoint.
///
/// Every field is optional on the wire; rows missing anything needed for
/// ranking are skipped by [`ApiResult::into_raw`].
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiResult {
    #[serde(rename = "NetScore")]
    pub net_score: Option<i64>,
    #[serde(rename = "TotalTimeSecs")]
    pub total_time_secs: Option<u64>,
    #[serde(rename = "Firstname", default)]
    pub firstname: String,
    #[serde(rename = "Surname", default)]
    pub surname: String,
    #[serde(rename = "TrackStartDateTimeUTC")]
    pub track_start_utc: Option<String>,
}

impl ApiResult {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.surname)
    }

    /// Convert into a ranked-ready result, or explain why the row is unusable.
    pub fn into_raw(self) -> Result<RawResult, String> {
        let name = self.full_name();
        let score = self
            .net_score
            .ok_or_else(|| format!("{}: missing NetScore", name))?;
        let time_secs = self
            .total_time_secs
            .ok_or_else(|| format!("{}: missing TotalTimeSecs", name))?;
        let start = self
            .track_start_utc
            .as_deref()
            .ok_or_else(|| format!("{}: missing TrackStartDateTimeUTC", name))?;
        let submitted_at = DateTime::parse_from_rfc3339(start)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| format!("{}: bad TrackStartDateTimeUTC '{}': {}", name, start, e))?;

        Ok(RawResult {
            name,
            score,
            time_secs,
            submitted_at,
        })
    }
}

/// Convert every usable row, logging and skipping the rest.
pub fn to_raw_results(event_name: &str, rows: Vec<ApiResult>) -> Vec<RawResult> {
    rows.into_iter()
        .filter_map(|row| match row.into_raw() {
            Ok(raw) => Some(raw),
            Err(reason) => {
                tracing::warn!(event = event_name, "Skipping malformed result: {}", reason);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SAMPLE: &str = r#"{
        "results": [
            {
                "NetScore": 420,
                "TotalTimeSecs": 3541,
                "Firstname": "Alice",
                "Surname": "Smith",
                "TrackStartDateTimeUTC": "2025-03-14T09:30:00Z",
                "Course": "60 min score"
            },
            {
                "NetScore": 380,
                "TotalTimeSecs": 3599,
                "Firstname": "Bob",
                "Surname": "Jones",
                "TrackStartDateTimeUTC": "not a date"
            },
            {
                "TotalTimeSecs": 3000,
                "Firstname": "Carol",
                "Surname": "White",
                "TrackStartDateTimeUTC": "2025-03-14T10:00:00+01:00"
            }
        ]
    }"#;

    #[test]
    fn test_parse_api_response() {
        let response: ApiResponse = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(response.results.len(), 3);
        assert_eq!(response.results[0].full_name(), "Alice Smith");
        assert_eq!(response.results[2].net_score, None);
    }

    #[test]
    fn test_into_raw() {
        let response: ApiResponse = serde_json::from_str(SAMPLE).unwrap();
        let raw = response.results[0].clone().into_raw().unwrap();
        assert_eq!(raw.name, "Alice Smith");
        assert_eq!(raw.score, 420);
        assert_eq!(raw.time_secs, 3541);
        assert_eq!(
            raw.submitted_at,
            Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_offset_timestamp_normalized_to_utc() {
        let row = ApiResult {
            net_score: Some(1),
            total_time_secs: Some(1),
            firstname: "A".to_string(),
            surname: "B".to_string(),
            track_start_utc: Some("2025-03-14T10:00:00+01:00".to_string()),
        };
        assert_eq!(
            row.into_raw().unwrap().submitted_at,
            Utc.with_ymd_and_hms(2025, 3, 14, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_malformed_rows_skipped() {
        let response: ApiResponse = serde_json::from_str(SAMPLE).unwrap();
        let raw = to_raw_results("Test Event", response.results);
        assert_eq!(raw.len(), 1);
        assert_eq!(raw[0].name, "Alice Smith");
    }

    #[test]
    fn test_missing_timestamp_is_error_not_zero() {
        let row = ApiResult {
            net_score: Some(10),
            total_time_secs: Some(100),
            firstname: "No".to_string(),
            surname: "Time".to_string(),
            track_start_utc: None,
        };
        let err = row.into_raw().unwrap_err();
        assert!(err.contains("TrackStartDateTimeUTC"));
    }

    #[test]
    fn test_empty_response() {
        let response: ApiResponse = serde_json::from_str("{}").unwrap();
        assert!(response.results.is_empty());
    }
}
