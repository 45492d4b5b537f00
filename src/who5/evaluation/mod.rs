mod alerting;
mod classification;
mod config;
mod scoring;

pub use classification::{WellbeingCategory, WellbeingTier, LOW_TIER_UPPER, MEDIUM_TIER_UPPER};
pub use config::EvaluationConfig;
pub use scoring::{compute_final_score, compute_raw_score};

use super::change::{detect_significant_change, SignificantChange};
use super::domain::{AnswerSet, FinalScore, SurveyOutcome};

/// Stateless engine applying the configured thresholds to validated input.
///
/// All methods are pure projections of their arguments; the engine holds
/// only the injected configuration, never mutable state.
#[derive(Debug, Clone)]
pub struct Who5Engine {
    config: EvaluationConfig,
}

impl Who5Engine {
    pub fn new(config: EvaluationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Score a validated answer set and decide its alert status.
    pub fn evaluate(&self, answers: &AnswerSet) -> SurveyOutcome {
        let (raw_score, final_score) = scoring::score_answers(answers);
        let is_alert = alerting::is_alert(final_score, &self.config);
        let priority = is_alert.then(|| alerting::decide_priority(final_score, &self.config));

        SurveyOutcome {
            raw_score,
            final_score,
            is_alert,
            priority,
        }
    }

    /// Tier classification for display. Uses the same alert boundary as
    /// [`Who5Engine::evaluate`] by construction.
    pub fn classify(&self, score: FinalScore) -> WellbeingTier {
        classification::classify(score, &self.config)
    }

    pub fn is_alert(&self, score: FinalScore) -> bool {
        alerting::is_alert(score, &self.config)
    }

    /// Compare two final scores from the same subject's history.
    pub fn significant_change(&self, previous: FinalScore, current: FinalScore) -> SignificantChange {
        detect_significant_change(previous, current, self.config.significant_change_threshold)
    }
}
