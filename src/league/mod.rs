pub mod config;
pub mod ledger;
pub mod normalize;
pub mod points;
pub mod ranker;
pub mod types;

pub use config::ScoringConfig;
pub use ledger::RunnerLedger;
pub use normalize::normalize;
pub use points::{assign_points, points_for_position};
pub use ranker::{compare_runners, rank, LeagueTable, Standing};
pub use types::{NormalizedResult, PointsAward, RawResult, Runner};

use crate::config::ClosingDate;

/// Run the whole league computation over events already fetched, in
/// configuration order.
///
/// Each item pairs an event's closing date with its raw results. The event
/// index used for every runner's results is the item's position.
pub fn compute_league<I>(events: I, scoring: &ScoringConfig) -> LeagueTable
where
    I: IntoIterator<Item = (ClosingDate, Vec<RawResult>)>,
{
    let mut ledger = RunnerLedger::new();

    for (event_index, (closing_date, raw)) in events.into_iter().enumerate() {
        let ordered = normalize(raw, &closing_date);
        let awards = assign_points(&ordered, scoring.max_points);
        tracing::debug!(
            event_index,
            counted = awards.len(),
            "Recorded event results"
        );
        ledger.record(event_index, &awards);
    }

    rank(ledger.into_runners(), scoring)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};

    fn closing(day: u32) -> ClosingDate {
        ClosingDate::new(NaiveDate::from_ymd_opt(2025, 3, day).unwrap())
    }

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, day, 10, 0, 0).unwrap()
    }

    fn raw(name: &str, score: i64, time_secs: u64, day: u32) -> RawResult {
        RawResult {
            name: name.to_string(),
            score,
            time_secs,
            submitted_at: at(day),
        }
    }

    fn season() -> Vec<(ClosingDate, Vec<RawResult>)> {
        vec![
            (
                closing(5),
                vec![
                    raw("Alice", 400, 3000, 1),
                    raw("Bob", 350, 2800, 2),
                    raw("Carol", 350, 2900, 3),
                    raw("Bob", 300, 2500, 4),
                ],
            ),
            (
                closing(12),
                vec![
                    raw("Bob", 500, 3300, 8),
                    raw("Alice", 450, 3100, 9),
                    // Late, ignored
                    raw("Dan", 900, 1000, 20),
                ],
            ),
            (closing(19), vec![]),
            (
                closing(26),
                vec![raw("Alice", 200, 3500, 22), raw("Carol", 250, 3600, 23)],
            ),
        ]
    }

    fn scoring() -> ScoringConfig {
        ScoringConfig {
            max_points: 10,
            max_events_to_count: 2,
        }
    }

    #[test]
    fn test_full_season() {
        let table = compute_league(season(), &scoring());

        // Event 0: Alice 10, Carol 9, Bob 8 (his later 300 counts)
        // Event 1: Bob 10, Alice 9
        // Event 3: Carol 10, Alice 9
        let rows: Vec<(&str, u32, usize)> = table
            .entries
            .iter()
            .map(|s| (s.runner.name.as_str(), s.score, s.runs()))
            .collect();
        assert_eq!(
            rows,
            vec![("Alice", 19, 3), ("Carol", 19, 2), ("Bob", 18, 2)]
        );
        assert!(table.entries[1].tied);
        assert!(!table.entries[2].tied);

        let alice = &table.entries[0].runner;
        assert_eq!(alice.points_for(0), Some(10));
        assert_eq!(alice.points_for(2), None);
        assert_eq!(alice.points_for(3), Some(9));
    }

    #[test]
    fn test_late_only_runner_never_appears() {
        let table = compute_league(season(), &scoring());
        assert!(table.entries.iter().all(|s| s.runner.name != "Dan"));
    }

    #[test]
    fn test_idempotent() {
        let first = compute_league(season(), &scoring());
        let second = compute_league(season(), &scoring());
        assert_eq!(first, second);
    }

    #[test]
    fn test_no_events() {
        let table = compute_league(Vec::new(), &scoring());
        assert!(table.is_empty());
    }
}
