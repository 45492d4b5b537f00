use serde::Serialize;

use super::change::{ChangeDirection, SignificantChange};
use super::domain::FinalScore;
use super::evaluation::Who5Engine;
use super::repository::SurveyRecord;

/// Change-detection output enriched with the prior score for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignificantChangeView {
    pub has_change: bool,
    pub delta: i16,
    pub direction: Option<ChangeDirection>,
    pub previous_score: FinalScore,
}

impl SignificantChangeView {
    fn from_change(change: SignificantChange, previous_score: FinalScore) -> Self {
        Self {
            has_change: change.has_change,
            delta: change.delta,
            direction: change.direction,
            previous_score,
        }
    }
}

/// Outcome of looking back through a subject's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum HistoryComparison {
    /// Explicit sentinel: the subject has no completed prior survey.
    NoPriorSurvey,
    Compared(SignificantChangeView),
}

/// Select the most recently completed survey strictly before `current`.
///
/// Ordering is by completion timestamp exclusively, never by record id or
/// insertion order; records without a completion timestamp are ineligible.
pub fn previous_completed<'a>(
    history: &'a [SurveyRecord],
    current: &SurveyRecord,
) -> Option<&'a SurveyRecord> {
    let completed_at = current.completed_at?;
    history
        .iter()
        .filter(|record| record.survey_id != current.survey_id)
        .filter_map(|record| record.completed_at.map(|at| (record, at)))
        .filter(|(_, at)| *at < completed_at)
        .max_by_key(|(_, at)| *at)
        .map(|(record, _)| record)
}

/// Locate the prior survey and run change detection against it.
pub fn compare(
    history: &[SurveyRecord],
    current: &SurveyRecord,
    engine: &Who5Engine,
) -> HistoryComparison {
    match previous_completed(history, current) {
        Some(previous) => {
            let change =
                engine.significant_change(previous.final_score(), current.final_score());
            HistoryComparison::Compared(SignificantChangeView::from_change(
                change,
                previous.final_score(),
            ))
        }
        None => HistoryComparison::NoPriorSurvey,
    }
}
