use serde::{Deserialize, Serialize};

/// League scoring configuration.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   max_points: 50
///   max_events_to_count: 4
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Points awarded for first place in an event. Each following place earns
    /// one point less, never dropping below 1.
    pub max_points: u32,

    /// Number of best event results summed into a runner's total. Runners
    /// with fewer runs than this are ranked below runners with more.
    pub max_events_to_count: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            max_points: 50,
            max_events_to_count: 4,
        }
    }
}
