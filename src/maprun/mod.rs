pub mod cache;
pub mod client;
pub mod types;

pub use cache::{clear_cache, get_cache_path, CacheConfig, CachedSource};
pub use client::{event_results_url, MapRunClient};
pub use types::{ApiResponse, ApiResult};

use async_trait::async_trait;
use thiserror::Error;

use crate::league::RawResult;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("MapRun returned HTTP {status} for event '{event}'")]
    Status {
        event: String,
        status: reqwest::StatusCode,
    },

    #[error("Invalid results URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to parse results JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Anything that can produce the raw results for a named event.
#[async_trait]
pub trait ResultsSource: Send + Sync {
    async fn fetch_results(&self, event_name: &str) -> Result<Vec<RawResult>, FetchError>;
}
