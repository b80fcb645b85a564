//! Early-warning score calculators
//!
//! Three independent piecewise-range tables over one vitals snapshot.
//! All functions are total over valid numeric ranges; out-of-range input
//! is a caller-side validation concern, not a calculator concern.

use crate::models::{ConsciousnessLevel, TriageScores, VitalSigns};

/// National Early Warning Score, 0-20
///
/// 0-4 low risk, 5-6 medium risk (urgent response), 7+ high risk
/// (emergency response).
pub fn calculate_news(vitals: &VitalSigns) -> i32 {
    let mut score = 0;

    score += match vitals.respiratory_rate {
        i32::MIN..=8 => 3,
        9..=11 => 1,
        12..=20 => 0,
        21..=24 => 2,
        _ => 3,
    };

    score += match vitals.spo2 {
        i32::MIN..=91 => 3,
        92..=93 => 2,
        94..=95 => 1,
        _ => 0,
    };

    if vitals.oxygen_supplementation {
        score += 2;
    }

    score += match vitals.heart_rate {
        i32::MIN..=40 => 3,
        41..=50 => 1,
        51..=90 => 0,
        91..=110 => 1,
        111..=130 => 2,
        _ => 3,
    };

    score += match vitals.systolic_bp {
        i32::MIN..=90 => 3,
        91..=100 => 2,
        101..=110 => 1,
        111..=219 => 0,
        _ => 3,
    };

    score += if vitals.temperature <= 35.0 {
        3
    } else if vitals.temperature <= 36.0 {
        1
    } else if vitals.temperature <= 38.0 {
        0
    } else if vitals.temperature <= 39.0 {
        1
    } else {
        2
    };

    if vitals.consciousness_level.is_altered() {
        score += 3;
    }

    score
}

/// Modified Early Warning Score, 0-14
///
/// 0-2 low risk, 3-4 medium risk, 5+ high risk.
pub fn calculate_mews(vitals: &VitalSigns) -> i32 {
    let mut score = 0;

    score += match vitals.respiratory_rate {
        i32::MIN..=8 => 2,
        9..=14 => 0,
        15..=20 => 1,
        21..=29 => 2,
        _ => 3,
    };

    score += match vitals.heart_rate {
        i32::MIN..=39 => 2,
        40..=50 => 1,
        51..=100 => 0,
        101..=110 => 1,
        111..=129 => 2,
        _ => 3,
    };

    score += match vitals.systolic_bp {
        i32::MIN..=69 => 3,
        70..=80 => 2,
        81..=100 => 1,
        101..=199 => 0,
        _ => 2,
    };

    score += if vitals.temperature < 35.0 {
        2
    } else if vitals.temperature <= 38.4 {
        0
    } else {
        2
    };

    // AVPU maps directly onto 0-3
    score += match vitals.consciousness_level {
        ConsciousnessLevel::Alert => 0,
        ConsciousnessLevel::Voice => 1,
        ConsciousnessLevel::Pain => 2,
        ConsciousnessLevel::Unresponsive => 3,
    };

    score
}

/// Quick SOFA sepsis screen, 0-3
///
/// One point each for tachypnea, altered mentation and hypotension.
pub fn calculate_qsofa(vitals: &VitalSigns) -> i32 {
    let mut score = 0;

    if vitals.respiratory_rate >= 22 {
        score += 1;
    }

    if vitals.consciousness_level.is_altered() {
        score += 1;
    }

    if vitals.systolic_bp <= 100 {
        score += 1;
    }

    score
}

impl TriageScores {
    /// Compute all three scores from one vitals snapshot
    pub fn from_vitals(vitals: &VitalSigns) -> Self {
        TriageScores {
            news: calculate_news(vitals),
            mews: calculate_mews(vitals),
            qsofa: calculate_qsofa(vitals),
        }
    }
}
