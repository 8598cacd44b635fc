use async_trait::async_trait;
use reqwest::Url;
use tokio_retry::{strategy::ExponentialBackoff, Retry};

use super::types::{to_raw_results, ApiResponse};
use super::{FetchError, ResultsSource};
use crate::league::RawResult;

const DEFAULT_API_URL: &str = "https://p.fne.com.au:8886/resultsGetPublicForEventv2";
const RESULTS_PAGE_URL: &str = "https://results.maprun.net/#/event_results";

/// Public results page for an event, as linked from the rendered table.
///
/// The page routes on the URL fragment, so the query string goes after `#`.
pub fn event_results_url(event_name: &str) -> String {
    let query = Url::parse_with_params("https://results.maprun.net/", &[("eventName", event_name)])
        .ok()
        .and_then(|url| url.query().map(str::to_string))
        .unwrap_or_default();
    format!("{}?{}", RESULTS_PAGE_URL, query)
}

/// HTTP client for the MapRun public results API.
pub struct MapRunClient {
    api_url: String,
    client: reqwest::Client,
}

impl MapRunClient {
    pub fn new() -> Result<Self, FetchError> {
        Self::with_api_url(DEFAULT_API_URL)
    }

    pub fn with_api_url(api_url: impl Into<String>) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("maprun-league/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        Ok(Self {
            api_url: api_url.into(),
            client,
        })
    }

    /// Fetch and decode one event's results without retrying.
    async fn fetch_once(&self, event_name: &str) -> Result<ApiResponse, FetchError> {
        let url = Url::parse_with_params(&self.api_url, &[("eventName", event_name)])
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", self.api_url, e)))?;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                event: event_name.to_string(),
                status,
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl ResultsSource for MapRunClient {
    async fn fetch_results(&self, event_name: &str) -> Result<Vec<RawResult>, FetchError> {
        // Retry strategy: exponential backoff with 3 attempts
        let retry_strategy = ExponentialBackoff::from_millis(100)
            .max_delay(std::time::Duration::from_secs(5))
            .take(3);

        let response = Retry::spawn(retry_strategy, || async {
            self.fetch_once(event_name).await.inspect_err(|e| {
                tracing::debug!(event = event_name, "MapRun request failed: {}", e);
            })
        })
        .await?;

        tracing::debug!(
            event = event_name,
            rows = response.results.len(),
            "Fetched MapRun results"
        );

        Ok(to_raw_results(event_name, response.results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_results_url_escapes_name() {
        let url = event_results_url("Spring Sprint & Co");
        assert!(url.starts_with("https://results.maprun.net/"));
        assert!(url.contains("eventName=Spring+Sprint+%26+Co"));
    }

    #[test]
    fn test_event_results_url_keeps_fragment_route() {
        assert_eq!(
            event_results_url("Park"),
            "https://results.maprun.net/#/event_results?eventName=Park"
        );
    }
}
