use anyhow::{Context, Result};
use futures::stream::{self, StreamExt, TryStreamExt};

use crate::config::Config;
use crate::league::{compute_league, LeagueTable, RawResult};
use crate::maprun::ResultsSource;

const MAX_CONCURRENT_FETCHES: usize = 4;

/// Fetch every configured event and compute the league table.
///
/// Fetches run concurrently but are collected in configuration order, and
/// the ledger is only built once every event has arrived. Any failed fetch
/// aborts the whole computation.
pub async fn process_league<S>(source: &S, config: &Config) -> Result<LeagueTable>
where
    S: ResultsSource + ?Sized,
{
    let fetched: Vec<Vec<RawResult>> = stream::iter(config.events.iter())
        .map(|event| async move {
            tracing::info!(event = %event.name, closing = %event.closing_date, "Fetching results");
            source
                .fetch_results(&event.name)
                .await
                .with_context(|| format!("Failed to get results for event {}", event.name))
        })
        .buffered(MAX_CONCURRENT_FETCHES)
        .try_collect()
        .await?;

    for (event, results) in config.events.iter().zip(&fetched) {
        tracing::debug!(event = %event.name, results = results.len(), "Results received");
    }

    let events = config
        .events
        .iter()
        .map(|e| e.closing_date)
        .zip(fetched);

    let table = compute_league(events, &config.scoring);
    tracing::info!(
        runners = table.len(),
        events = config.events.len(),
        "League table computed"
    );
    Ok(table)
}
