use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One participant's submission to one event, as delivered by a results
/// source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawResult {
    pub name: String,
    pub score: i64,
    pub time_secs: u64,
    pub submitted_at: DateTime<Utc>,
}

/// The single submission that counts for a participant in an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedResult {
    pub name: String,
    pub score: i64,
    pub time_secs: u64,
    pub submitted_at: DateTime<Utc>,
}

impl From<RawResult> for NormalizedResult {
    fn from(raw: RawResult) -> Self {
        Self {
            name: raw.name,
            score: raw.score,
            time_secs: raw.time_secs,
            submitted_at: raw.submitted_at,
        }
    }
}

/// Points earned by one participant in one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointsAward {
    pub name: String,
    pub points: u32,
}

/// A participant tracked across the league.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Runner {
    pub name: String,
    /// Event index (configuration order) to points earned there.
    results: BTreeMap<usize, u32>,
}

impl Runner {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            results: BTreeMap::new(),
        }
    }

    /// Points earned in the event at `event_index`, if the runner took part.
    pub fn points_for(&self, event_index: usize) -> Option<u32> {
        self.results.get(&event_index).copied()
    }

    pub fn results(&self) -> &BTreeMap<usize, u32> {
        &self.results
    }

    /// Number of events the runner has a counted result in.
    pub fn runs(&self) -> usize {
        self.results.len()
    }

    /// Sum of the runner's best `max_runs` event results.
    pub fn score(&self, max_runs: usize) -> u32 {
        let mut points: Vec<u32> = self.results.values().copied().collect();
        points.sort_unstable_by(|a, b| b.cmp(a));
        points.into_iter().take(max_runs).sum()
    }

    pub(crate) fn set_points(&mut self, event_index: usize, points: u32) {
        self.results.insert(event_index, points);
    }
}
