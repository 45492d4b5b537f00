use serde::{Deserialize, Serialize};

/// Clinical thresholds applied by the engine.
///
/// `alert_threshold` is a single shared cut point: it is both the
/// classifier's alerta/bajo boundary and the alert decider's trigger, so
/// the two can never drift apart. `high_priority_threshold` is a distinct,
/// deliberately lower constant (an alert at 12 gets media priority).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    pub alert_threshold: u8,
    pub high_priority_threshold: u8,
    pub significant_change_threshold: u8,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            alert_threshold: 13,
            high_priority_threshold: 10,
            significant_change_threshold: 10,
        }
    }
}
