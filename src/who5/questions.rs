//! Canonical WHO-5 reference data (Spanish).
//!
//! The option labels are ordered by descending frequency, value 5 ("Todo
//! el tiempo") down to value 0 ("Nunca"). Flipping this mapping would
//! invert the entire scoring semantics, so the table is fixed data.

use serde::Serialize;

/// Recall period the instrument asks about.
pub const RECALL_PERIOD: &str = "Últimas 2 semanas";
/// Instrument identifier exposed alongside the questions.
pub const INSTRUMENT: &str = "WHO-5";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuestionOption {
    pub valor: u8,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    pub numero: u8,
    pub texto: &'static str,
    pub opciones: [QuestionOption; 6],
}

const OPTIONS: [QuestionOption; 6] = [
    QuestionOption {
        valor: 5,
        label: "Todo el tiempo",
    },
    QuestionOption {
        valor: 4,
        label: "La mayor parte del tiempo",
    },
    QuestionOption {
        valor: 3,
        label: "Más de la mitad del tiempo",
    },
    QuestionOption {
        valor: 2,
        label: "Menos de la mitad del tiempo",
    },
    QuestionOption {
        valor: 1,
        label: "De vez en cuando",
    },
    QuestionOption {
        valor: 0,
        label: "Nunca",
    },
];

const QUESTIONS: [Question; 5] = [
    Question {
        numero: 1,
        texto: "Me he sentido alegre y de buen humor",
        opciones: OPTIONS,
    },
    Question {
        numero: 2,
        texto: "Me he sentido tranquilo y relajado",
        opciones: OPTIONS,
    },
    Question {
        numero: 3,
        texto: "Me he sentido activo y enérgico",
        opciones: OPTIONS,
    },
    Question {
        numero: 4,
        texto: "Me he despertado fresco y descansado",
        opciones: OPTIONS,
    },
    Question {
        numero: 5,
        texto: "Mi vida cotidiana ha estado llena de cosas que me interesan",
        opciones: OPTIONS,
    },
];

/// The five official WHO-5 questions, in instrument order.
pub const fn who5_questions() -> &'static [Question; 5] {
    &QUESTIONS
}
