use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use super::domain::{Answer, SubjectContext, SubjectId, SurveyId, SurveyOutcome, SurveySubmission};
use super::questions::{who5_questions, INSTRUMENT, RECALL_PERIOD};
use super::repository::{StoreError, SurveyStore};
use super::service::{SurveyService, SurveyServiceError};

/// Router builder exposing the survey intake and read endpoints.
pub fn survey_router<S>(service: Arc<SurveyService<S>>) -> Router
where
    S: SurveyStore + 'static,
{
    Router::new()
        .route("/api/v1/who5/questions", get(questions_handler))
        .route("/api/v1/surveys", post(submit_handler::<S>))
        .route(
            "/api/v1/subjects/:subject_id/surveys",
            get(history_handler::<S>),
        )
        .route(
            "/api/v1/subjects/:subject_id/surveys/:survey_id/result",
            get(result_handler::<S>),
        )
        .with_state(service)
}

/// Submission payload: the principal snapshot from the auth collaborator
/// plus the candidate answer set.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitSurveyRequest {
    pub subject_id: String,
    pub consent_granted: bool,
    pub answers: Vec<Answer>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub can_contact: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitSurveyResponse {
    pub survey_id: SurveyId,
    #[serde(flatten)]
    pub outcome: SurveyOutcome,
}

pub(crate) async fn questions_handler() -> Response {
    let payload = json!({
        "instrumento": INSTRUMENT,
        "periodo": RECALL_PERIOD,
        "preguntas": who5_questions(),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn submit_handler<S>(
    State(service): State<Arc<SurveyService<S>>>,
    axum::Json(request): axum::Json<SubmitSurveyRequest>,
) -> Response
where
    S: SurveyStore + 'static,
{
    let subject = SubjectContext {
        subject_id: SubjectId(request.subject_id),
        consent_granted: request.consent_granted,
    };
    let submission = SurveySubmission {
        answers: request.answers,
        comment: request.comment,
        can_contact: request.can_contact,
    };

    match service.submit(&subject, submission) {
        Ok(record) => {
            let body = SubmitSurveyResponse {
                survey_id: record.survey_id.clone(),
                outcome: record.outcome,
            };
            (StatusCode::CREATED, axum::Json(body)).into_response()
        }
        Err(err @ SurveyServiceError::ConsentRequired) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        Err(SurveyServiceError::Validation(err)) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(SurveyServiceError::Store(StoreError::Conflict)) => {
            let payload = json!({ "error": "survey already exists" });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            // Score errors here mean a broken upstream contract, not user input.
            error!(error = %other, "survey submission failed");
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn history_handler<S>(
    State(service): State<Arc<SurveyService<S>>>,
    Path(subject_id): Path<String>,
) -> Response
where
    S: SurveyStore + 'static,
{
    match service.history(&SubjectId(subject_id)) {
        Ok(summaries) => (StatusCode::OK, axum::Json(summaries)).into_response(),
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn result_handler<S>(
    State(service): State<Arc<SurveyService<S>>>,
    Path((subject_id, survey_id)): Path<(String, String)>,
) -> Response
where
    S: SurveyStore + 'static,
{
    match service.result(&SubjectId(subject_id), &SurveyId(survey_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(SurveyServiceError::Store(StoreError::NotFound)) => {
            let payload = json!({ "error": "survey not found" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
