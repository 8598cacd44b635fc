use std::collections::HashSet;

use super::schema::Config;

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.scoring.max_points < 1 {
        errors.push("scoring.max_points: must be at least 1".to_string());
    }
    if config.scoring.max_events_to_count < 1 {
        errors.push("scoring.max_events_to_count: must be at least 1".to_string());
    }

    let mut seen = HashSet::new();
    for (i, event) in config.events.iter().enumerate() {
        if event.name.trim().is_empty() {
            errors.push(format!("events[{}].name: must not be empty", i));
        } else if !seen.insert(event.name.as_str()) {
            errors.push(format!(
                "events[{}].name: duplicate event '{}'",
                i, event.name
            ));
        }
    }

    let publisher = &config.publisher;
    if publisher.enabled {
        if publisher.url.trim().is_empty() {
            errors.push("publisher.url: required when publisher is enabled".to_string());
        } else if !publisher.url.starts_with("http://") && !publisher.url.starts_with("https://") {
            errors.push(format!(
                "publisher.url: '{}' is not an http(s) URL",
                publisher.url
            ));
        }
        if publisher.username.trim().is_empty() {
            errors.push("publisher.username: required when publisher is enabled".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClosingDate, EventConfig, PublisherConfig};
    use crate::league::ScoringConfig;
    use chrono::NaiveDate;

    fn event(name: &str) -> EventConfig {
        EventConfig {
            name: name.to_string(),
            closing_date: ClosingDate::new(NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()),
        }
    }

    fn config() -> Config {
        Config {
            scoring: ScoringConfig {
                max_points: 50,
                max_events_to_count: 3,
            },
            events: vec![event("One"), event("Two")],
            publisher: PublisherConfig::default(),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&config()).is_ok());
    }

    #[test]
    fn test_no_events_is_valid() {
        let mut config = config();
        config.events.clear();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_zero_max_points() {
        let mut config = config();
        config.scoring.max_points = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("scoring.max_points"));
    }

    #[test]
    fn test_duplicate_event_name() {
        let mut config = config();
        config.events.push(event("One"));
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("events[2].name"));
    }

    #[test]
    fn test_enabled_publisher_requires_fields() {
        let mut config = config();
        config.publisher.enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("publisher.url"));
        assert!(errors[1].contains("publisher.username"));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = config();
        config.scoring.max_points = 0;
        config.scoring.max_events_to_count = 0;
        config.events.push(event(""));
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
