use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::domain::{AlertCreationRequest, SubjectId, SurveyId};
use super::repository::{StoreError, SurveyRecord, SurveyStore};

/// In-memory [`SurveyStore`] backing the demo server and the test suites.
///
/// Survey and alert land under one lock acquisition, standing in for the
/// single transaction a real store would use.
#[derive(Default, Clone)]
pub struct MemorySurveyStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    surveys: HashMap<SubjectId, Vec<SurveyRecord>>,
    alerts: Vec<AlertCreationRequest>,
}

impl MemorySurveyStore {
    /// Alert requests persisted so far, in creation order.
    pub fn alerts(&self) -> Vec<AlertCreationRequest> {
        self.inner.lock().expect("store mutex poisoned").alerts.clone()
    }
}

impl SurveyStore for MemorySurveyStore {
    fn store_completed(
        &self,
        record: SurveyRecord,
        alert: Option<AlertCreationRequest>,
    ) -> Result<SurveyRecord, StoreError> {
        let mut guard = self.inner.lock().expect("store mutex poisoned");
        let surveys = guard.surveys.entry(record.subject_id.clone()).or_default();
        if surveys
            .iter()
            .any(|existing| existing.survey_id == record.survey_id)
        {
            return Err(StoreError::Conflict);
        }
        surveys.push(record.clone());
        if let Some(alert) = alert {
            guard.alerts.push(alert);
        }
        Ok(record)
    }

    fn fetch(
        &self,
        subject: &SubjectId,
        survey: &SurveyId,
    ) -> Result<Option<SurveyRecord>, StoreError> {
        let guard = self.inner.lock().expect("store mutex poisoned");
        Ok(guard
            .surveys
            .get(subject)
            .and_then(|surveys| {
                surveys
                    .iter()
                    .find(|record| &record.survey_id == survey)
                    .cloned()
            }))
    }

    fn history(&self, subject: &SubjectId) -> Result<Vec<SurveyRecord>, StoreError> {
        let guard = self.inner.lock().expect("store mutex poisoned");
        let mut history = guard.surveys.get(subject).cloned().unwrap_or_default();
        // Completion time descending; incomplete records sink to the end.
        history.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        Ok(history)
    }
}
