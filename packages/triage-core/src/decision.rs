//! Triage level decision cascade
//!
//! Combines the three early-warning scores with raw vitals and clinical
//! feature flags into a final urgency classification. The cascade is a
//! fixed ordered table of tier rules evaluated first-match-wins; tiers
//! are ordered most-severe first and are mutually exclusive by
//! construction.

use crate::models::{
    ClinicalFeatures, ConsciousnessLevel, TriageLevel, TriageResult, TriageScores, VitalSigns,
};

/// Trigger predicate of one tier
type TierPredicate = fn(&TriageScores, &VitalSigns, &ClinicalFeatures) -> bool;

/// One row of the decision table
struct TierRule {
    level: TriageLevel,
    priority_floor: i32,
    escalation_required: bool,
    triggered: TierPredicate,
}

/// The ordered decision table. The final rule is the unconditional
/// non-urgent default, so iteration always yields a match.
static TIER_RULES: [TierRule; 5] = [
    TierRule {
        level: TriageLevel::Resuscitation,
        priority_floor: 90,
        escalation_required: true,
        triggered: |scores, vitals, features| {
            scores.qsofa >= 2
                || scores.news >= 7
                || vitals.consciousness_level == ConsciousnessLevel::Unresponsive
                || vitals.spo2 < 85
                || vitals.systolic_bp < 70
                || features.seizures
        },
    },
    TierRule {
        level: TriageLevel::Emergency,
        priority_floor: 70,
        escalation_required: true,
        triggered: |scores, vitals, features| {
            scores.news >= 5
                || scores.mews >= 5
                || features.chest_pain
                || features.bleeding
                || vitals.spo2 < 90
                || vitals.systolic_bp < 90
        },
    },
    TierRule {
        level: TriageLevel::Urgent,
        priority_floor: 50,
        escalation_required: false,
        triggered: |scores, vitals, features| {
            scores.news >= 3
                || scores.mews >= 3
                || features.dyspnea
                || features.trauma
                || vitals.temperature > 38.5
                || vitals.temperature < 36.0
        },
    },
    TierRule {
        level: TriageLevel::SemiUrgent,
        priority_floor: 30,
        escalation_required: false,
        triggered: |scores, _, _| scores.news > 0 || scores.mews > 0,
    },
    TierRule {
        level: TriageLevel::NonUrgent,
        priority_floor: 10,
        escalation_required: false,
        triggered: |_, _, _| true,
    },
];

/// Immediate actions attached to a tier
fn immediate_actions(level: TriageLevel) -> Vec<String> {
    let actions: &[&str] = match level {
        TriageLevel::Resuscitation => &[
            "Immediate resuscitation team involvement",
            "Secure the airway",
            "High-flow oxygen",
            "Venous access and fluid therapy",
            "Continuous vital signs monitoring",
        ],
        TriageLevel::Emergency => &[
            "Physician review within 10 minutes",
            "Oxygen if SpO2 below 94%",
            "Venous access",
            "Vital signs monitoring every 15 minutes",
        ],
        TriageLevel::Urgent => &[
            "Physician review within 30 minutes",
            "Vital signs check every 30 minutes",
            "Ensure patient comfort",
        ],
        TriageLevel::SemiUrgent => &[
            "Physician review within 60 minutes",
            "Vital signs measurement every hour",
        ],
        TriageLevel::NonUrgent => &[
            "Routine review within 120 minutes",
            "Registration of patient data",
        ],
    };
    actions.iter().map(|s| s.to_string()).collect()
}

/// Required investigations attached to a tier
fn investigations_needed(level: TriageLevel) -> Vec<String> {
    let investigations: &[&str] = match level {
        TriageLevel::Resuscitation => &[
            "ECG",
            "Head CT (trauma or neurology)",
            "Full blood count, biochemistry",
            "Coagulation panel",
            "Blood gases",
        ],
        TriageLevel::Emergency => &[
            "ECG (chest pain)",
            "Full blood count",
            "Blood biochemistry",
            "Chest X-ray (dyspnea)",
        ],
        TriageLevel::Urgent => &["Full blood count", "Urinalysis", "X-ray if indicated"],
        TriageLevel::SemiUrgent => &["Basic labs as indicated"],
        TriageLevel::NonUrgent => &[],
    };
    investigations.iter().map(|s| s.to_string()).collect()
}

/// Monitoring plan keyed by the final level alone, independent of which
/// tier condition fired
fn monitoring_plan(level: TriageLevel) -> Vec<String> {
    let plan: &[&str] = match level {
        TriageLevel::Resuscitation => &[
            "Continuous ECG, SpO2 and blood pressure monitoring",
            "Consciousness check every 5 minutes",
            "Urine output tracking",
        ],
        TriageLevel::Emergency => &[
            "Vital signs monitoring every 15 minutes",
            "Condition reassessment every 30 minutes",
        ],
        TriageLevel::Urgent => &[
            "Vital signs check every 30 minutes",
            "Reassessment after 1 hour",
        ],
        TriageLevel::SemiUrgent => &[
            "Vital signs check every hour",
            "Reassessment after 2 hours",
        ],
        TriageLevel::NonUrgent => &["Basic monitoring", "Reassessment on condition change"],
    };
    plan.iter().map(|s| s.to_string()).collect()
}

/// Decide the triage level for one assessment
///
/// Pure and deterministic: identical inputs always produce an identical
/// result. The priority score is the weighted score sum capped at 100,
/// raised to the floor of the matched tier.
pub fn determine_triage(
    scores: &TriageScores,
    vitals: &VitalSigns,
    features: &ClinicalFeatures,
) -> TriageResult {
    let base_priority = (scores.news * 4 + scores.mews * 3 + scores.qsofa * 10).min(100);

    // The default rule always matches, so the iterator cannot be empty.
    let rule = TIER_RULES
        .iter()
        .find(|rule| (rule.triggered)(scores, vitals, features))
        .unwrap_or(&TIER_RULES[TIER_RULES.len() - 1]);

    TriageResult {
        level: rule.level,
        color: rule.level.color(),
        priority_score: base_priority.max(rule.priority_floor),
        immediate_actions: immediate_actions(rule.level),
        monitoring_plan: monitoring_plan(rule.level),
        investigations_needed: investigations_needed(rule.level),
        escalation_required: rule.escalation_required,
    }
}
