use serde::{Deserialize, Serialize};

/// Number of questions in the WHO-5 instrument.
pub const QUESTION_COUNT: usize = 5;
/// Highest value a single answer can take ("Todo el tiempo").
pub const MAX_ANSWER_VALUE: u8 = 5;
/// Upper bound of the raw score domain (sum of five answers).
pub const RAW_SCORE_MAX: u8 = 25;
/// Upper bound of the final score domain.
pub const FINAL_SCORE_MAX: u8 = 100;
/// The WHO-5 standard linear transform: final = raw * 4, exact.
pub const SCORE_SCALE: u8 = 4;

/// Identifier wrapper for survey subjects (students or staff).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectId(pub String);

/// Identifier wrapper for completed surveys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurveyId(pub String);

/// One answered question as submitted over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_number: u8,
    pub value: u8,
}

/// Structural validation failures for an incoming answer set.
///
/// Each variant names the offending field so callers can surface precise
/// feedback to the respondent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("survey must contain exactly 5 answers, found {found}")]
    WrongAnswerCount { found: usize },
    #[error("question {question} is not part of the WHO-5 instrument")]
    UnknownQuestion { question: u8 },
    #[error("question {question} was answered more than once")]
    DuplicateQuestion { question: u8 },
    #[error("question {question} was not answered")]
    MissingQuestion { question: u8 },
    #[error("answer to question {question} must be between 0 and 5, found {value}")]
    ValueOutOfRange { question: u8, value: u8 },
}

/// A score value reached a calculator outside its defined domain.
///
/// Unlike [`ValidationError`] this indicates an upstream contract
/// violation rather than bad user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ScoreError {
    #[error("expected 5 answer values, found {found}")]
    AnswerCount { found: usize },
    #[error("answer value {value} outside 0..=5")]
    AnswerValue { value: u8 },
    #[error("raw score {found} outside 0..=25")]
    RawScoreRange { found: u8 },
    #[error("final score {found} outside 0..=100")]
    FinalScoreRange { found: u8 },
}

/// The five validated answers of one survey, in canonical question order.
///
/// Construction enforces the structural invariant: exactly one answer per
/// question 1..=5, each value in 0..=5. Instances are immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Answer>", into = "Vec<Answer>")]
pub struct AnswerSet {
    answers: [Answer; QUESTION_COUNT],
}

impl AnswerSet {
    pub fn new(mut answers: Vec<Answer>) -> Result<Self, ValidationError> {
        if answers.len() != QUESTION_COUNT {
            return Err(ValidationError::WrongAnswerCount {
                found: answers.len(),
            });
        }

        let mut seen = [false; QUESTION_COUNT];
        for answer in &answers {
            if answer.question_number < 1 || answer.question_number as usize > QUESTION_COUNT {
                return Err(ValidationError::UnknownQuestion {
                    question: answer.question_number,
                });
            }
            let slot = &mut seen[(answer.question_number - 1) as usize];
            if *slot {
                return Err(ValidationError::DuplicateQuestion {
                    question: answer.question_number,
                });
            }
            *slot = true;
            if answer.value > MAX_ANSWER_VALUE {
                return Err(ValidationError::ValueOutOfRange {
                    question: answer.question_number,
                    value: answer.value,
                });
            }
        }
        if let Some(index) = seen.iter().position(|answered| !answered) {
            return Err(ValidationError::MissingQuestion {
                question: index as u8 + 1,
            });
        }

        // Canonical order so storage and audits never depend on submission order.
        answers.sort_by_key(|answer| answer.question_number);
        let answers: [Answer; QUESTION_COUNT] =
            answers
                .try_into()
                .map_err(|rest: Vec<Answer>| ValidationError::WrongAnswerCount {
                    found: rest.len(),
                })?;

        Ok(Self { answers })
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn values(&self) -> [u8; QUESTION_COUNT] {
        let mut values = [0u8; QUESTION_COUNT];
        for (value, answer) in values.iter_mut().zip(self.answers.iter()) {
            *value = answer.value;
        }
        values
    }
}

impl TryFrom<Vec<Answer>> for AnswerSet {
    type Error = ValidationError;

    fn try_from(answers: Vec<Answer>) -> Result<Self, Self::Error> {
        Self::new(answers)
    }
}

impl From<AnswerSet> for Vec<Answer> {
    fn from(set: AnswerSet) -> Self {
        set.answers.to_vec()
    }
}

/// Sum of the five answers, guaranteed in `0..=25`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawScore(u8);

impl RawScore {
    pub fn new(value: u8) -> Result<Self, ScoreError> {
        if value > RAW_SCORE_MAX {
            return Err(ScoreError::RawScoreRange { found: value });
        }
        Ok(Self(value))
    }

    /// Crate-internal shortcut for sums produced by a validated
    /// [`AnswerSet`]: five answers of at most 5 each stay within the domain.
    pub(crate) const fn from_validated_sum(value: u8) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

/// The standardized WHO-5 output, guaranteed in `0..=100`.
///
/// This is the only score persisted and displayed; the raw score never
/// travels without the answer set that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FinalScore(u8);

impl FinalScore {
    pub fn new(value: u8) -> Result<Self, ScoreError> {
        if value > FINAL_SCORE_MAX {
            return Err(ScoreError::FinalScoreRange { found: value });
        }
        Ok(Self(value))
    }

    /// Infallible leg of the derivation chain: 25 * 4 never overflows 100.
    pub const fn from_raw(raw: RawScore) -> Self {
        Self(raw.value() * SCORE_SCALE)
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

/// Follow-up priority attached to an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertPriority {
    Alta,
    Media,
}

impl AlertPriority {
    pub const fn label(self) -> &'static str {
        match self {
            AlertPriority::Alta => "alta",
            AlertPriority::Media => "media",
        }
    }
}

/// Lifecycle states of a follow-up alert. Transitions past `Pendiente`
/// belong to the psychological follow-up workflow, not to this core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    Pendiente,
    EnAtencion,
    Resuelta,
}

impl AlertStatus {
    pub const fn label(self) -> &'static str {
        match self {
            AlertStatus::Pendiente => "pendiente",
            AlertStatus::EnAtencion => "en_atencion",
            AlertStatus::Resuelta => "resuelta",
        }
    }
}

/// Authenticated principal snapshot handed over by the upstream identity
/// collaborator. The core only inspects the consent flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectContext {
    pub subject_id: SubjectId,
    pub consent_granted: bool,
}

/// A candidate survey submission before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveySubmission {
    pub answers: Vec<Answer>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub can_contact: bool,
}

/// The scored result of one completed survey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyOutcome {
    pub raw_score: RawScore,
    pub final_score: FinalScore,
    pub is_alert: bool,
    pub priority: Option<AlertPriority>,
}

/// Side-effect request emitted alongside an alerting survey, persisted by
/// the external record store in the same transaction as the survey itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertCreationRequest {
    pub subject_id: SubjectId,
    pub survey_id: SurveyId,
    pub final_score: FinalScore,
    pub priority: AlertPriority,
    pub status: AlertStatus,
}
