use serde::{Deserialize, Serialize};

use super::super::domain::FinalScore;
use super::config::EvaluationConfig;

/// Upper bound (exclusive) of the "bajo" tier. Fixed by the instrument,
/// unlike the configurable alerta/bajo boundary.
pub const LOW_TIER_UPPER: u8 = 51;
/// Upper bound (exclusive) of the "medio" tier.
pub const MEDIUM_TIER_UPPER: u8 = 76;

/// Ordinal wellbeing category, ascending by score range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WellbeingCategory {
    Alerta,
    Bajo,
    Medio,
    Alto,
}

impl WellbeingCategory {
    pub const fn label(self) -> &'static str {
        match self {
            WellbeingCategory::Alerta => "alerta",
            WellbeingCategory::Bajo => "bajo",
            WellbeingCategory::Medio => "medio",
            WellbeingCategory::Alto => "alto",
        }
    }
}

/// Classified wellbeing tier: category plus the fixed display content
/// shown to respondents and clinicians. Computed on read, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WellbeingTier {
    pub nivel: &'static str,
    pub categoria: WellbeingCategory,
    pub color: &'static str,
    pub mensaje: &'static str,
}

/// Map a final score onto its tier.
///
/// Half-open intervals, upper bound exclusive except the top tier:
/// `[0, alert_threshold)` alerta, `[alert_threshold, 51)` bajo,
/// `[51, 76)` medio, `[76, 100]` alto. The first boundary is the same
/// configuration value the alert decider consumes.
pub fn classify(score: FinalScore, config: &EvaluationConfig) -> WellbeingTier {
    let value = score.value();
    if value < config.alert_threshold {
        WellbeingTier {
            nivel: "Bajo bienestar",
            categoria: WellbeingCategory::Alerta,
            color: "#E53E3E",
            mensaje: "Tu nivel de bienestar puede requerir atención. Te invitamos a contactar al área de Bienestar Universitario.",
        }
    } else if value < LOW_TIER_UPPER {
        WellbeingTier {
            nivel: "Bienestar moderado",
            categoria: WellbeingCategory::Bajo,
            color: "#D69E2E",
            mensaje: "Tu nivel de bienestar es moderado. Considera explorar recursos de apoyo disponibles.",
        }
    } else if value < MEDIUM_TIER_UPPER {
        WellbeingTier {
            nivel: "Buen bienestar",
            categoria: WellbeingCategory::Medio,
            color: "#4A90E2",
            mensaje: "Tu nivel de bienestar es bueno. Continúa cuidando tu salud emocional.",
        }
    } else {
        WellbeingTier {
            nivel: "Excelente bienestar",
            categoria: WellbeingCategory::Alto,
            color: "#38A169",
            mensaje: "Tu nivel de bienestar es excelente. ¡Sigue así!",
        }
    }
}
