use serde::{Deserialize, Serialize};

use super::closing_date::ClosingDate;
use crate::league::ScoringConfig;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Config {
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub events: Vec<EventConfig>,
    #[serde(default, alias = "drupal_publisher")]
    pub publisher: PublisherConfig,
}

/// A single league event, identified by its MapRun event name.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct EventConfig {
    pub name: String,
    pub closing_date: ClosingDate,
}

/// Remote page the rendered table is pushed to.
///
/// `password` may be left out of the file and supplied through
/// `MAPRUN_LEAGUE_PUBLISH_PASSWORD` instead.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct PublisherConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}
