use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use super::domain::{
    AlertCreationRequest, AlertPriority, AlertStatus, AnswerSet, FinalScore, RawScore, ScoreError,
    SubjectContext, SubjectId, SurveyId, SurveySubmission, ValidationError,
};
use super::evaluation::{EvaluationConfig, WellbeingTier, Who5Engine};
use super::history::{self, HistoryComparison};
use super::repository::{StoreError, SurveyRecord, SurveyStore, SurveySummaryView};

/// Orchestrates survey intake: consent gate, structural validation,
/// scoring, the alert decision, and the atomic hand-off to the record
/// store. Pure transformation apart from that delegated write.
pub struct SurveyService<S> {
    store: Arc<S>,
    engine: Arc<Who5Engine>,
}

static SURVEY_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_survey_id() -> SurveyId {
    let id = SURVEY_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SurveyId(format!("enc-{id:06}"))
}

impl<S> SurveyService<S>
where
    S: SurveyStore + 'static,
{
    pub fn new(store: Arc<S>, config: EvaluationConfig) -> Self {
        Self {
            store,
            engine: Arc::new(Who5Engine::new(config)),
        }
    }

    pub fn engine(&self) -> &Who5Engine {
        &self.engine
    }

    /// Validate and score a submission, persisting the completed survey
    /// together with its follow-up alert request when the score demands one.
    pub fn submit(
        &self,
        subject: &SubjectContext,
        submission: SurveySubmission,
    ) -> Result<SurveyRecord, SurveyServiceError> {
        if !subject.consent_granted {
            return Err(SurveyServiceError::ConsentRequired);
        }

        let answers = AnswerSet::new(submission.answers)?;
        let outcome = self.engine.evaluate(&answers);

        let survey_id = next_survey_id();
        let now = Utc::now();
        let record = SurveyRecord {
            survey_id: survey_id.clone(),
            subject_id: subject.subject_id.clone(),
            created_at: now,
            completed_at: Some(now),
            answers,
            outcome,
            comment: submission.comment,
        };

        // The engine sets priority exactly when it flags an alert.
        let alert = match outcome.priority {
            Some(priority) if outcome.is_alert => Some(AlertCreationRequest {
                subject_id: subject.subject_id.clone(),
                survey_id,
                final_score: outcome.final_score,
                priority,
                status: AlertStatus::Pendiente,
            }),
            _ => None,
        };

        if let Some(alert) = &alert {
            info!(
                subject = %alert.subject_id.0,
                score = alert.final_score.value(),
                priority = alert.priority.label(),
                "survey below alert threshold, requesting follow-up"
            );
        }

        let stored = self.store.store_completed(record, alert)?;
        Ok(stored)
    }

    /// Detailed result for one survey: classification plus change
    /// detection against the subject's prior completed survey.
    pub fn result(
        &self,
        subject: &SubjectId,
        survey: &SurveyId,
    ) -> Result<SurveyResultView, SurveyServiceError> {
        let record = self
            .store
            .fetch(subject, survey)?
            .ok_or(StoreError::NotFound)?;

        let history = self.store.history(subject)?;
        let classification = self.engine.classify(record.final_score());
        let significant_change = history::compare(&history, &record, &self.engine);

        Ok(SurveyResultView {
            survey_id: record.survey_id,
            completed_at: record.completed_at,
            raw_score: record.outcome.raw_score,
            final_score: record.outcome.final_score,
            is_alert: record.outcome.is_alert,
            priority: record.outcome.priority,
            classification,
            significant_change,
            comment: record.comment,
        })
    }

    /// The subject's completed surveys, most recent first.
    pub fn history(&self, subject: &SubjectId) -> Result<Vec<SurveySummaryView>, SurveyServiceError> {
        let history = self.store.history(subject)?;
        Ok(history.iter().map(SurveyRecord::summary_view).collect())
    }
}

/// Read-path projection of one survey for respondents and clinicians.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyResultView {
    pub survey_id: SurveyId,
    pub completed_at: Option<DateTime<Utc>>,
    pub raw_score: RawScore,
    pub final_score: FinalScore,
    pub is_alert: bool,
    pub priority: Option<AlertPriority>,
    pub classification: WellbeingTier,
    pub significant_change: HistoryComparison,
    pub comment: Option<String>,
}

/// Error raised by the survey service.
#[derive(Debug, thiserror::Error)]
pub enum SurveyServiceError {
    #[error("informed consent must be accepted before submitting a survey")]
    ConsentRequired,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Score(#[from] ScoreError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
