use serde::{Deserialize, Serialize};

use super::domain::FinalScore;

/// Direction of a significant change between two surveys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeDirection {
    Mejora,
    Empeoramiento,
}

impl ChangeDirection {
    pub const fn label(self) -> &'static str {
        match self {
            ChangeDirection::Mejora => "mejora",
            ChangeDirection::Empeoramiento => "empeoramiento",
        }
    }
}

/// Transient comparison result between two final scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignificantChange {
    pub has_change: bool,
    pub delta: i16,
    pub direction: Option<ChangeDirection>,
}

/// Compare two final scores from the same subject, ordered by completion
/// time (`previous` completed first).
///
/// `has_change` holds when `|current - previous| >= threshold`; direction
/// is only set alongside it. With a threshold of at least 1 the delta is
/// never zero when a change is reported. Any two valid scores are
/// comparable; there are no error conditions.
pub fn detect_significant_change(
    previous: FinalScore,
    current: FinalScore,
    threshold: u8,
) -> SignificantChange {
    let delta = current.value() as i16 - previous.value() as i16;
    let has_change = delta.unsigned_abs() >= threshold as u16;
    let direction = has_change.then(|| {
        if delta > 0 {
            ChangeDirection::Mejora
        } else {
            ChangeDirection::Empeoramiento
        }
    });

    SignificantChange {
        has_change,
        delta,
        direction,
    }
}
