//! WHO-5 wellbeing survey scoring and alerting service.
//!
//! The crate centers on the [`who5`] module: a pure scoring engine for the
//! WHO-5 Well-Being Index, the alert decision it drives, and the intake
//! orchestration that hands completed surveys (plus any follow-up alert
//! request) to an external record store behind the [`who5::SurveyStore`]
//! trait. Identity, persistence, and report generation are collaborators,
//! not residents.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod who5;
