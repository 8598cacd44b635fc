use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::PublisherConfig;

/// Environment variable that supplies the publisher password without
/// storing it in the config file.
pub const ENV_PASSWORD_VAR: &str = "MAPRUN_LEAGUE_PUBLISH_PASSWORD";

/// Text format id for "Full HTML" on the target page.
const BODY_FORMAT: &str = "2";

/// Check for a password in the MAPRUN_LEAGUE_PUBLISH_PASSWORD environment
/// variable. Returns Some(password) if set and non-empty.
pub fn get_password_from_env() -> Option<String> {
    match std::env::var(ENV_PASSWORD_VAR) {
        Ok(val) => {
            let trimmed = val.trim().to_string();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed)
            }
        }
        Err(_) => None,
    }
}

/// Pick the publisher password: environment first, then config file.
pub fn resolve_password(config: &PublisherConfig) -> Result<String> {
    get_password_from_env()
        .or_else(|| config.password.clone())
        .with_context(|| {
            format!(
                "No publisher password configured. Set {} or publisher.password",
                ENV_PASSWORD_VAR
            )
        })
}

#[derive(Debug, Serialize)]
struct BodyField<'a> {
    value: &'a str,
    format: &'a str,
}

#[derive(Debug, Serialize)]
struct TypeField<'a> {
    target_id: &'a str,
}

#[derive(Debug, Serialize)]
struct PatchPayload<'a> {
    body: [BodyField<'a>; 1],
    #[serde(rename = "type")]
    node_type: [TypeField<'a>; 1],
}

fn payload(html: &str) -> PatchPayload<'_> {
    PatchPayload {
        body: [BodyField {
            value: html,
            format: BODY_FORMAT,
        }],
        node_type: [TypeField { target_id: "page" }],
    }
}

fn patch_url(url: &str) -> String {
    format!("{}?_format=json", url)
}

/// Replace the body of the configured page with `html`.
pub async fn publish(html: &str, config: &PublisherConfig, password: &str) -> Result<()> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("maprun-league/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to create HTTP client")?;

    let response = client
        .patch(patch_url(&config.url))
        .basic_auth(&config.username, Some(password))
        .json(&payload(html))
        .send()
        .await
        .context("Failed to send PATCH request")?;

    let status = response.status();
    if status != reqwest::StatusCode::OK {
        anyhow::bail!("Received non-200 status code: {}", status.as_u16());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_shape() {
        let json = serde_json::to_value(payload("<p>hi</p>")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "body": [{"value": "<p>hi</p>", "format": "2"}],
                "type": [{"target_id": "page"}]
            })
        );
    }

    #[test]
    fn test_patch_url() {
        assert_eq!(
            patch_url("https://example.org/node/42"),
            "https://example.org/node/42?_format=json"
        );
    }

    #[test]
    fn test_resolve_password_from_config() {
        // Only meaningful when the env var is not set in the test environment
        if get_password_from_env().is_some() {
            return;
        }
        let config = PublisherConfig {
            enabled: true,
            url: "https://example.org".to_string(),
            username: "editor".to_string(),
            password: Some("secret".to_string()),
        };
        assert_eq!(resolve_password(&config).unwrap(), "secret");

        let missing = PublisherConfig {
            password: None,
            ..config
        };
        let err = resolve_password(&missing).unwrap_err();
        assert!(err.to_string().contains(ENV_PASSWORD_VAR));
    }
}
