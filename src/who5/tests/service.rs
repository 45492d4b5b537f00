use super::common::*;
use std::sync::Arc;

use crate::who5::domain::{AlertPriority, AlertStatus, SubjectId, SurveyId, ValidationError};
use crate::who5::history::HistoryComparison;
use crate::who5::repository::{StoreError, SurveyStore};
use crate::who5::service::{SurveyService, SurveyServiceError};

#[test]
fn submit_persists_a_completed_scored_survey() {
    let (service, store) = build_service();

    let record = service
        .submit(&subject(true), submission([5, 5, 5, 5, 5]))
        .expect("submission succeeds");

    assert_eq!(record.outcome.raw_score.value(), 25);
    assert_eq!(record.outcome.final_score.value(), 100);
    assert!(!record.outcome.is_alert);
    assert!(record.completed_at.is_some());
    assert!(store.alerts().is_empty(), "high score must not raise alerts");

    let stored = store
        .fetch(&record.subject_id, &record.survey_id)
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(stored, record);
}

#[test]
fn alerting_submission_stores_survey_and_alert_together() {
    let (service, store) = build_service();

    let record = service
        .submit(&subject(true), submission([0, 0, 0, 0, 0]))
        .expect("submission succeeds");

    assert!(record.outcome.is_alert);
    assert_eq!(record.outcome.priority, Some(AlertPriority::Alta));

    let alerts = store.alerts();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].survey_id, record.survey_id);
    assert_eq!(alerts[0].final_score, record.outcome.final_score);
    assert_eq!(alerts[0].status, AlertStatus::Pendiente);
}

#[test]
fn borderline_alert_keeps_media_priority() {
    let (service, store) = build_service();

    let record = service
        .submit(&subject(true), submission([1, 1, 1, 0, 0]))
        .expect("submission succeeds");

    assert_eq!(record.outcome.final_score.value(), 12);
    assert!(record.outcome.is_alert);
    assert_eq!(record.outcome.priority, Some(AlertPriority::Media));
    assert_eq!(store.alerts()[0].priority, AlertPriority::Media);
}

#[test]
fn submit_requires_consent() {
    let (service, store) = build_service();

    match service.submit(&subject(false), submission([3, 3, 3, 3, 3])) {
        Err(SurveyServiceError::ConsentRequired) => {}
        other => panic!("expected consent error, got {other:?}"),
    }
    assert!(store
        .history(&subject(false).subject_id)
        .expect("history readable")
        .is_empty());
}

#[test]
fn submit_propagates_validation_errors_without_storing() {
    let (service, store) = build_service();

    let mut invalid = submission([3, 3, 3, 3, 3]);
    invalid.answers[4].question_number = 1;

    match service.submit(&subject(true), invalid) {
        Err(SurveyServiceError::Validation(ValidationError::DuplicateQuestion { question: 1 })) => {}
        other => panic!("expected duplicate question error, got {other:?}"),
    }
    assert!(store
        .history(&subject(true).subject_id)
        .expect("history readable")
        .is_empty());
}

#[test]
fn submit_propagates_store_failures() {
    let service = SurveyService::new(Arc::new(UnavailableStore), config());

    match service.submit(&subject(true), submission([3, 3, 3, 3, 3])) {
        Err(SurveyServiceError::Store(StoreError::Unavailable(_))) => {}
        other => panic!("expected store failure, got {other:?}"),
    }
}

#[test]
fn first_result_has_no_prior_survey_sentinel() {
    let (service, _) = build_service();
    let principal = subject(true);

    let record = service
        .submit(&principal, submission([3, 3, 3, 3, 3]))
        .expect("submission succeeds");
    let view = service
        .result(&principal.subject_id, &record.survey_id)
        .expect("result available");

    assert_eq!(view.final_score.value(), 60);
    assert_eq!(view.classification.categoria.label(), "medio");
    assert!(matches!(view.significant_change, HistoryComparison::NoPriorSurvey));
}

#[test]
fn result_compares_against_the_latest_completed_survey() {
    let (service, store) = build_service();
    let subject_id = SubjectId("est-042".to_string());

    // Insertion order deliberately disagrees with completion order: the
    // comparison must follow completion timestamps.
    let newest_prior = record_for("est-042", "enc-b", [4, 4, 4, 4, 2], Some(completed_at(7)));
    let oldest = record_for("est-042", "enc-a", [1, 1, 1, 1, 1], Some(completed_at(30)));
    let current = record_for("est-042", "enc-c", [3, 3, 3, 2, 2], Some(completed_at(0)));
    store.store_completed(newest_prior, None).expect("stored");
    store.store_completed(oldest, None).expect("stored");
    store.store_completed(current, None).expect("stored");

    let view = service
        .result(&subject_id, &SurveyId("enc-c".to_string()))
        .expect("result available");

    // prior final 72, current final 52: delta -20, a significant worsening.
    match view.significant_change {
        HistoryComparison::Compared(change) => {
            assert!(change.has_change);
            assert_eq!(change.delta, -20);
            assert_eq!(change.previous_score.value(), 72);
        }
        other => panic!("expected comparison, got {other:?}"),
    }
}

#[test]
fn incomplete_surveys_are_ineligible_as_previous() {
    let (service, store) = build_service();
    let subject_id = SubjectId("est-100".to_string());

    let draft = record_for("est-100", "enc-draft", [5, 5, 5, 5, 5], None);
    let current = record_for("est-100", "enc-now", [2, 2, 2, 2, 2], Some(completed_at(0)));
    store.store_completed(draft, None).expect("stored");
    store.store_completed(current, None).expect("stored");

    let view = service
        .result(&subject_id, &SurveyId("enc-now".to_string()))
        .expect("result available");
    assert!(matches!(view.significant_change, HistoryComparison::NoPriorSurvey));
}

#[test]
fn result_for_unknown_survey_is_not_found() {
    let (service, _) = build_service();

    match service.result(
        &SubjectId("est-001".to_string()),
        &SurveyId("enc-missing".to_string()),
    ) {
        Err(SurveyServiceError::Store(StoreError::NotFound)) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn history_lists_summaries_most_recent_first() {
    let (service, store) = build_service();
    let subject_id = SubjectId("est-007".to_string());

    store
        .store_completed(
            record_for("est-007", "enc-old", [2, 2, 2, 2, 2], Some(completed_at(14))),
            None,
        )
        .expect("stored");
    store
        .store_completed(
            record_for("est-007", "enc-new", [4, 4, 4, 4, 4], Some(completed_at(1))),
            None,
        )
        .expect("stored");

    let summaries = service.history(&subject_id).expect("history readable");
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].survey_id, SurveyId("enc-new".to_string()));
    assert_eq!(summaries[0].final_score.value(), 80);
    assert_eq!(summaries[1].survey_id, SurveyId("enc-old".to_string()));
}
