use std::cmp::Ordering;

use super::config::ScoringConfig;
use super::types::Runner;

/// One row of the final league table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    /// 1-based row ordinal.
    pub position: usize,
    /// Same rank key as the row above; shown as `=` instead of a position.
    pub tied: bool,
    pub score: u32,
    pub runner: Runner,
}

impl Standing {
    pub fn runs(&self) -> usize {
        self.runner.runs()
    }
}

/// Final ordered standings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueTable {
    pub max_events_to_count: usize,
    pub entries: Vec<Standing>,
}

impl LeagueTable {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Ordering key for one runner. Runs are capped at the qualifying threshold,
/// so below it more runs always wins and at or above it only the score
/// matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RankKey {
    qualifying_runs: usize,
    score: u32,
}

impl RankKey {
    fn of(runner: &Runner, max_events_to_count: usize) -> Self {
        Self {
            qualifying_runs: runner.runs().min(max_events_to_count),
            score: runner.score(max_events_to_count),
        }
    }
}

/// Compare two runners for league placement; `Less` means `a` ranks higher.
///
/// If either has fewer than `max_events_to_count` runs and their run counts
/// differ, the one with more runs is ahead regardless of score. Otherwise
/// the higher aggregate score is ahead.
pub fn compare_runners(a: &Runner, b: &Runner, max_events_to_count: usize) -> Ordering {
    let min_runs = a.runs().min(b.runs());
    if min_runs < max_events_to_count && a.runs() != b.runs() {
        return b.runs().cmp(&a.runs());
    }
    b.score(max_events_to_count)
        .cmp(&a.score(max_events_to_count))
}

/// Order every runner into the final league table.
pub fn rank(runners: Vec<Runner>, scoring: &ScoringConfig) -> LeagueTable {
    let n = scoring.max_events_to_count;

    let mut keyed: Vec<(RankKey, Runner)> = runners
        .into_iter()
        .map(|runner| (RankKey::of(&runner, n), runner))
        .collect();

    // Capping runs at n turns the pairwise rule into a total order
    keyed.sort_by(|(ka, a), (kb, b)| {
        kb.qualifying_runs
            .cmp(&ka.qualifying_runs)
            .then_with(|| kb.score.cmp(&ka.score))
            .then_with(|| a.name.cmp(&b.name))
    });

    let mut entries = Vec::with_capacity(keyed.len());
    let mut previous: Option<RankKey> = None;
    for (i, (key, runner)) in keyed.into_iter().enumerate() {
        entries.push(Standing {
            position: i + 1,
            tied: previous == Some(key),
            score: key.score,
            runner,
        });
        previous = Some(key);
    }

    LeagueTable {
        max_events_to_count: n,
        entries,
    }
}
