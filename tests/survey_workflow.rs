//! Integration specifications for the WHO-5 survey intake and read-path
//! workflow, exercised through the public service facade and HTTP router.

mod common {
    use std::sync::Arc;

    use bienestar_who5::who5::{
        Answer, EvaluationConfig, MemorySurveyStore, SubjectContext, SubjectId, SurveyService,
        SurveySubmission,
    };

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

    pub(super) fn submission(values: [u8; 5]) -> SurveySubmission {
        SurveySubmission {
            answers: answers(values),
            comment: None,
            can_contact: true,
        }
    }

    pub(super) fn principal(id: &str) -> SubjectContext {
        SubjectContext {
            subject_id: SubjectId(id.to_string()),
            consent_granted: true,
        }
    }

    pub(super) fn build_service() -> (Arc<SurveyService<MemorySurveyStore>>, Arc<MemorySurveyStore>)
    {
        let store = Arc::new(MemorySurveyStore::default());
        let service = Arc::new(SurveyService::new(store.clone(), EvaluationConfig::default()));
        (service, store)
    }
}

use common::*;

use axum::http::StatusCode;
use bienestar_who5::who5::{survey_router, AlertPriority, AlertStatus, HistoryComparison};
use serde_json::{json, Value};
use tower::ServiceExt;

#[test]
fn low_scoring_survey_creates_a_pending_alert() {
    let (service, store) = build_service();
    let principal = principal("est-310");

    let record = service
        .submit(&principal, submission([0, 1, 0, 1, 0]))
        .expect("submission succeeds");

    assert_eq!(record.outcome.raw_score.value(), 2);
    assert_eq!(record.outcome.final_score.value(), 8);
    assert!(record.outcome.is_alert);
    assert_eq!(record.outcome.priority, Some(AlertPriority::Alta));

    let alerts = store.alerts();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].subject_id, principal.subject_id);
    assert_eq!(alerts[0].survey_id, record.survey_id);
    assert_eq!(alerts[0].status, AlertStatus::Pendiente);
}

#[test]
fn follow_up_survey_reports_significant_improvement() {
    let (service, _) = build_service();
    let principal = principal("est-311");

    let first = service
        .submit(&principal, submission([1, 1, 1, 0, 0]))
        .expect("first submission succeeds");
    let second = service
        .submit(&principal, submission([4, 4, 4, 4, 4]))
        .expect("second submission succeeds");

    let view = service
        .result(&principal.subject_id, &second.survey_id)
        .expect("result available");

    match view.significant_change {
        HistoryComparison::Compared(change) => {
            assert!(change.has_change);
            assert_eq!(change.delta, 80 - 12);
            assert_eq!(change.previous_score, first.outcome.final_score);
            assert_eq!(
                change.direction.map(|direction| direction.label()),
                Some("mejora")
            );
        }
        other => panic!("expected comparison against first survey, got {other:?}"),
    }
}

#[tokio::test]
async fn http_round_trip_submits_and_reads_a_result() {
    let (service, _) = build_service();
    let router = survey_router(service);

    let body = json!({
        "subjectId": "est-500",
        "consentGranted": true,
        "answers": [
            { "questionNumber": 1, "value": 3 },
            { "questionNumber": 2, "value": 4 },
            { "questionNumber": 3, "value": 3 },
            { "questionNumber": 4, "value": 2 },
            { "questionNumber": 5, "value": 4 }
        ]
    });

    let response = router
        .clone()
        .oneshot(
            axum::http::Request::post("/api/v1/surveys")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .expect("submit route executes");
    assert_eq!(response.status(), StatusCode::CREATED);

    let payload = read_json_body(response).await;
    assert_eq!(payload.get("finalScore"), Some(&json!(64)));
    let survey_id = payload
        .get("surveyId")
        .and_then(Value::as_str)
        .expect("survey id returned")
        .to_string();

    let response = router
        .oneshot(
            axum::http::Request::get(format!(
                "/api/v1/subjects/est-500/surveys/{survey_id}/result"
            ))
            .body(axum::body::Body::empty())
            .unwrap(),
        )
        .await
        .expect("result route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let payload = read_json_body(response).await;
    let classification = payload.get("classification").expect("classification present");
    assert_eq!(classification.get("categoria"), Some(&json!("medio")));
    assert_eq!(
        payload
            .get("significantChange")
            .and_then(|change| change.get("status")),
        Some(&json!("noPriorSurvey"))
    );
}

#[tokio::test]
async fn consentless_submission_is_rejected_end_to_end() {
    let (service, store) = build_service();
    let router = survey_router(service);

    let body = json!({
        "subjectId": "est-501",
        "consentGranted": false,
        "answers": [
            { "questionNumber": 1, "value": 3 },
            { "questionNumber": 2, "value": 3 },
            { "questionNumber": 3, "value": 3 },
            { "questionNumber": 4, "value": 3 },
            { "questionNumber": 5, "value": 3 }
        ]
    });

    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/surveys")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .expect("submit route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(store.alerts().is_empty());
}

async fn read_json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body collects");
    serde_json::from_slice(&bytes).expect("body is json")
}
