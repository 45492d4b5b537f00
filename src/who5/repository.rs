use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{
    AlertCreationRequest, AnswerSet, FinalScore, SubjectId, SurveyId, SurveyOutcome,
};

/// Persisted representation of one survey.
///
/// `completed_at` stays optional because surveys may be created and
/// completed at different instants; history comparison only ever looks at
/// records carrying a completion timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyRecord {
    pub survey_id: SurveyId,
    pub subject_id: SubjectId,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub answers: AnswerSet,
    pub outcome: SurveyOutcome,
    pub comment: Option<String>,
}

impl SurveyRecord {
    pub fn final_score(&self) -> FinalScore {
        self.outcome.final_score
    }

    pub fn summary_view(&self) -> SurveySummaryView {
        SurveySummaryView {
            survey_id: self.survey_id.clone(),
            final_score: self.outcome.final_score,
            is_alert: self.outcome.is_alert,
            completed_at: self.completed_at,
        }
    }
}

/// Condensed listing entry for a subject's survey history.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveySummaryView {
    pub survey_id: SurveyId,
    pub final_score: FinalScore,
    pub is_alert: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Storage abstraction over the external record store.
///
/// `store_completed` receives the survey and its optional alert request in
/// one call so implementations can commit both atomically; a partial
/// write (survey without its alert, or the reverse) is a correctness
/// violation on the store's side of the boundary.
pub trait SurveyStore: Send + Sync {
    fn store_completed(
        &self,
        record: SurveyRecord,
        alert: Option<AlertCreationRequest>,
    ) -> Result<SurveyRecord, StoreError>;

    fn fetch(
        &self,
        subject: &SubjectId,
        survey: &SurveyId,
    ) -> Result<Option<SurveyRecord>, StoreError>;

    /// The subject's surveys ordered by completion time, most recent
    /// first. Records without a completion timestamp sort last.
    fn history(&self, subject: &SubjectId) -> Result<Vec<SurveyRecord>, StoreError>;
}

/// Error enumeration for record store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("survey already exists")]
    Conflict,
    #[error("survey not found")]
    NotFound,
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}
