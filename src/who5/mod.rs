//! WHO-5 scoring core: domain types, the evaluation engine, change
//! detection, history comparison, and the intake orchestration that glues
//! them to the external record store.

pub mod change;
pub mod domain;
pub mod evaluation;
pub mod history;
pub mod memory;
pub mod questions;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use change::{detect_significant_change, ChangeDirection, SignificantChange};
pub use domain::{
    AlertCreationRequest, AlertPriority, AlertStatus, Answer, AnswerSet, FinalScore, RawScore,
    ScoreError, SubjectContext, SubjectId, SurveyId, SurveyOutcome, SurveySubmission,
    ValidationError,
};
pub use evaluation::{
    compute_final_score, compute_raw_score, EvaluationConfig, WellbeingCategory, WellbeingTier,
    Who5Engine,
};
pub use history::{HistoryComparison, SignificantChangeView};
pub use memory::MemorySurveyStore;
pub use questions::{who5_questions, Question, QuestionOption};
pub use repository::{StoreError, SurveyRecord, SurveyStore, SurveySummaryView};
pub use router::survey_router;
pub use service::{SurveyResultView, SurveyService, SurveyServiceError};
