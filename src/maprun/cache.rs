use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashSet;
use std::path::PathBuf;

use super::{FetchError, ResultsSource};
use crate::config::EventConfig;
use crate::league::RawResult;

/// How long after an event's closing boundary its results are treated as
/// final and served from disk.
const SETTLE_GRACE_DAYS: i64 = 2;

/// Configuration for results caching
#[derive(Clone, Debug)]
pub struct CacheConfig {
    pub enabled: bool, // false when --no-cache
}

/// Get the platform-appropriate cache directory for maprun-league
pub fn get_cache_path() -> PathBuf {
    dirs::cache_dir()
        .map(|p| p.join("maprun-league/results"))
        .unwrap_or_else(|| {
            PathBuf::from(format!(
                "{}/.cache/maprun-league/results",
                std::env::var("HOME").unwrap_or_default()
            ))
        })
}

/// Clear the results cache directory
pub fn clear_cache() -> Result<()> {
    let cache_path = get_cache_path();
    match std::fs::remove_dir_all(&cache_path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).context("Failed to remove cache directory"),
    }
}

fn cache_key(event_name: &str) -> String {
    format!("results:v1:{}", event_name)
}

/// Disk cache in front of another [`ResultsSource`].
///
/// Only settled events are cached: their closing boundary passed more than
/// [`SETTLE_GRACE_DAYS`] ago, so late uploads can no longer change which
/// submissions count. Everything else always goes to the inner source.
pub struct CachedSource<S> {
    inner: S,
    cache_path: PathBuf,
    config: CacheConfig,
    settled: HashSet<String>,
}

impl<S: ResultsSource> CachedSource<S> {
    pub fn new(
        inner: S,
        cache_path: PathBuf,
        config: CacheConfig,
        events: &[EventConfig],
        now: DateTime<Utc>,
    ) -> Self {
        let settled = events
            .iter()
            .filter(|e| e.closing_date.boundary() + Duration::days(SETTLE_GRACE_DAYS) <= now)
            .map(|e| e.name.clone())
            .collect();
        Self {
            inner,
            cache_path,
            config,
            settled,
        }
    }

    pub fn is_settled(&self, event_name: &str) -> bool {
        self.settled.contains(event_name)
    }

    fn read(&self, event_name: &str) -> Option<Vec<RawResult>> {
        let bytes = cacache::read_sync(&self.cache_path, cache_key(event_name)).ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    fn write(&self, event_name: &str, results: &[RawResult]) -> Result<()> {
        let json = serde_json::to_vec(results)?;
        cacache::write_sync(&self.cache_path, cache_key(event_name), &json)?;
        Ok(())
    }
}

#[async_trait]
impl<S: ResultsSource> ResultsSource for CachedSource<S> {
    async fn fetch_results(&self, event_name: &str) -> Result<Vec<RawResult>, FetchError> {
        let cacheable = self.config.enabled && self.is_settled(event_name);

        if cacheable {
            if let Some(results) = self.read(event_name) {
                tracing::debug!(event = event_name, "Using cached results");
                return Ok(results);
            }
        }

        let results = self.inner.fetch_results(event_name).await?;

        if cacheable {
            // Cache write failures only cost a refetch next time
            if let Err(e) = self.write(event_name, &results) {
                tracing::warn!(event = event_name, "Failed to cache results: {:#}", e);
            }
        }

        Ok(results)
    }
}
