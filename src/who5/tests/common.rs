use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::who5::domain::{
    AlertCreationRequest, Answer, AnswerSet, SubjectContext, SubjectId, SurveyId, SurveySubmission,
};
use crate::who5::evaluation::{EvaluationConfig, Who5Engine};
use crate::who5::memory::MemorySurveyStore;
use crate::who5::repository::{StoreError, SurveyRecord, SurveyStore};
use crate::who5::service::SurveyService;

pub(super) fn answers(values: [u8; 5]) -> Vec<Answer> {
    values
        .iter()
        .enumerate()
        .map(|(index, &value)| Answer {
            question_number: index as u8 + 1,
            value,
        })
        .collect()
}

pub(super) fn answer_set(values: [u8; 5]) -> AnswerSet {
    AnswerSet::new(answers(values)).expect("valid answer set")
}

pub(super) fn config() -> EvaluationConfig {
    EvaluationConfig::default()
}

pub(super) fn engine() -> Who5Engine {
    Who5Engine::new(config())
}

pub(super) fn subject(consent_granted: bool) -> SubjectContext {
    SubjectContext {
        subject_id: SubjectId("est-001".to_string()),
        consent_granted,
    }
}

pub(super) fn submission(values: [u8; 5]) -> SurveySubmission {
    SurveySubmission {
        answers: answers(values),
        comment: None,
        can_contact: false,
    }
}

pub(super) fn build_service() -> (SurveyService<MemorySurveyStore>, Arc<MemorySurveyStore>) {
    let store = Arc::new(MemorySurveyStore::default());
    let service = SurveyService::new(store.clone(), config());
    (service, store)
}

pub(super) fn completed_at(days_ago: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).single().expect("valid timestamp")
        - Duration::days(days_ago)
}

/// Handmade record with a controlled completion timestamp, for history tests.
pub(super) fn record_for(
    subject_id: &str,
    survey_id: &str,
    values: [u8; 5],
    completed: Option<DateTime<Utc>>,
) -> SurveyRecord {
    let answers = answer_set(values);
    let outcome = engine().evaluate(&answers);
    SurveyRecord {
        survey_id: SurveyId(survey_id.to_string()),
        subject_id: SubjectId(subject_id.to_string()),
        created_at: completed.unwrap_or_else(|| completed_at(0)),
        completed_at: completed,
        answers,
        outcome,
        comment: None,
    }
}

/// Store stub that always reports the collaborator as unavailable.
#[derive(Default, Clone)]
pub(super) struct UnavailableStore;

impl SurveyStore for UnavailableStore {
    fn store_completed(
        &self,
        _record: SurveyRecord,
        _alert: Option<AlertCreationRequest>,
    ) -> Result<SurveyRecord, StoreError> {
        Err(StoreError::Unavailable("record store offline".to_string()))
    }

    fn fetch(
        &self,
        _subject: &SubjectId,
        _survey: &SurveyId,
    ) -> Result<Option<SurveyRecord>, StoreError> {
        Err(StoreError::Unavailable("record store offline".to_string()))
    }

    fn history(&self, _subject: &SubjectId) -> Result<Vec<SurveyRecord>, StoreError> {
        Err(StoreError::Unavailable("record store offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body collects");
    serde_json::from_slice(&bytes).expect("body is json")
}
