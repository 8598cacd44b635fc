use std::collections::HashMap;

use super::types::{NormalizedResult, RawResult};
use crate::config::ClosingDate;

/// Reduce one event's raw results to a single, ordered result per runner.
///
/// Submissions after the closing date are dropped. For each name the latest
/// remaining submission counts; identical timestamps resolve to whichever
/// came last in the input. The output is ordered by score descending, then
/// time ascending, then name.
pub fn normalize(raw: Vec<RawResult>, cutoff: &ClosingDate) -> Vec<NormalizedResult> {
    let mut valid: Vec<RawResult> = raw
        .into_iter()
        .filter(|r| cutoff.accepts(r.submitted_at))
        .collect();

    // Stable, so equal timestamps keep input order and the last one wins below
    valid.sort_by_key(|r| r.submitted_at);

    let mut latest: HashMap<String, RawResult> = HashMap::with_capacity(valid.len());
    for result in valid {
        latest.insert(result.name.clone(), result);
    }

    let mut ordered: Vec<NormalizedResult> = latest.into_values().map(Into::into).collect();
    ordered.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.time_secs.cmp(&b.time_secs))
            .then_with(|| a.name.cmp(&b.name))
    });
    ordered
}
