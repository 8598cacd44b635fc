use std::collections::BTreeMap;

use super::types::{PointsAward, Runner};

/// Per-runner points accumulated across every processed event.
#[derive(Debug, Default)]
pub struct RunnerLedger {
    runners: BTreeMap<String, Runner>,
}

impl RunnerLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one event's awards. Runners are created on first mention;
    /// recording the same event again overwrites rather than adds.
    pub fn record(&mut self, event_index: usize, awards: &[PointsAward]) {
        for award in awards {
            self.runners
                .entry(award.name.clone())
                .or_insert_with(|| Runner::new(award.name.clone()))
                .set_points(event_index, award.points);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Runner> {
        self.runners.get(name)
    }

    pub fn len(&self) -> usize {
        self.runners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runners.is_empty()
    }

    pub fn runners(&self) -> impl Iterator<Item = &Runner> {
        self.runners.values()
    }

    pub fn into_runners(self) -> Vec<Runner> {
        self.runners.into_values().collect()
    }
}
