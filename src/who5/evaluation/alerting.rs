use super::super::domain::{AlertPriority, FinalScore};
use super::config::EvaluationConfig;

/// A score below the alert threshold triggers the follow-up workflow.
/// Same cut point as the classifier's alerta/bajo boundary.
pub fn is_alert(score: FinalScore, config: &EvaluationConfig) -> bool {
    score.value() < config.alert_threshold
}

/// Escalation priority for an alerting score. Only meaningful when
/// [`is_alert`] holds; a score of 12 is an alert with media priority.
pub fn decide_priority(score: FinalScore, config: &EvaluationConfig) -> AlertPriority {
    if score.value() < config.high_priority_threshold {
        AlertPriority::Alta
    } else {
        AlertPriority::Media
    }
}
