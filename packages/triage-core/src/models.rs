//! Shared data types of the triage decision engine
//!
//! This module defines the input snapshots taken at assessment time and
//! the result structure the decision cascade produces.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a stored enum value cannot be parsed back
#[derive(Error, Debug)]
#[error("unrecognized {kind} value: {value}")]
pub struct ParseEnumError {
    /// Which enum was being parsed
    pub kind: &'static str,
    /// The offending input
    pub value: String,
}

/// Consciousness level on the AVPU scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsciousnessLevel {
    /// Fully awake and oriented
    Alert,
    /// Responds to verbal stimulus
    Voice,
    /// Responds to painful stimulus only
    Pain,
    /// No response to any stimulus
    Unresponsive,
}

impl ConsciousnessLevel {
    /// True for any level below fully alert
    pub fn is_altered(self) -> bool {
        self != ConsciousnessLevel::Alert
    }
}

impl std::fmt::Display for ConsciousnessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConsciousnessLevel::Alert => write!(f, "alert"),
            ConsciousnessLevel::Voice => write!(f, "voice"),
            ConsciousnessLevel::Pain => write!(f, "pain"),
            ConsciousnessLevel::Unresponsive => write!(f, "unresponsive"),
        }
    }
}

impl FromStr for ConsciousnessLevel {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alert" => Ok(ConsciousnessLevel::Alert),
            "voice" => Ok(ConsciousnessLevel::Voice),
            "pain" => Ok(ConsciousnessLevel::Pain),
            "unresponsive" => Ok(ConsciousnessLevel::Unresponsive),
            other => Err(ParseEnumError {
                kind: "consciousness level",
                value: other.to_string(),
            }),
        }
    }
}

/// Vital signs snapshot for one assessment
///
/// Immutable input to the score calculators. Diastolic pressure, oxygen
/// flow and GCS are carried for the record but do not enter any score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalSigns {
    /// Respiratory rate in breaths per minute
    pub respiratory_rate: i32,
    /// Peripheral oxygen saturation in percent
    pub spo2: i32,
    /// Whether the patient is on supplemental oxygen
    #[serde(default)]
    pub oxygen_supplementation: bool,
    /// Oxygen flow rate in L/min, when supplemented
    #[serde(default)]
    pub oxygen_flow: Option<f64>,
    /// Heart rate in beats per minute
    pub heart_rate: i32,
    /// Systolic blood pressure in mmHg
    #[serde(rename = "systolicBP")]
    pub systolic_bp: i32,
    /// Diastolic blood pressure in mmHg
    #[serde(default, rename = "diastolicBP")]
    pub diastolic_bp: Option<i32>,
    /// Body temperature in degrees Celsius
    pub temperature: f64,
    /// Consciousness level on the AVPU scale
    pub consciousness_level: ConsciousnessLevel,
    /// Glasgow Coma Scale score (3-15), when assessed
    #[serde(default)]
    pub gcs_score: Option<i32>,
}

/// Clinical feature flags observed at presentation
///
/// Six independent booleans; all default to false when absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalFeatures {
    /// Chest pain reported or observed
    #[serde(default)]
    pub chest_pain: bool,
    /// Shortness of breath
    #[serde(default)]
    pub dyspnea: bool,
    /// Trauma at presentation
    #[serde(default)]
    pub trauma: bool,
    /// Active bleeding
    #[serde(default)]
    pub bleeding: bool,
    /// Seizure activity
    #[serde(default)]
    pub seizures: bool,
    /// Altered mental status
    #[serde(default)]
    pub altered_mental_status: bool,
}

/// The three early-warning scores derived from one vitals snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageScores {
    /// National Early Warning Score (0-20)
    pub news: i32,
    /// Modified Early Warning Score (0-14)
    pub mews: i32,
    /// Quick SOFA sepsis screen (0-3)
    pub qsofa: i32,
}

/// Clinical urgency level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TriageLevel {
    /// Immediate life-saving intervention required
    Resuscitation,
    /// Very high risk, physician within minutes
    Emergency,
    /// High risk, physician within 30 minutes
    Urgent,
    /// Low risk with abnormal findings
    SemiUrgent,
    /// No acute findings
    NonUrgent,
}

impl TriageLevel {
    /// The display color assigned 1:1 to each level
    pub fn color(self) -> TriageColor {
        match self {
            TriageLevel::Resuscitation => TriageColor::Red,
            TriageLevel::Emergency => TriageColor::Orange,
            TriageLevel::Urgent => TriageColor::Yellow,
            TriageLevel::SemiUrgent => TriageColor::Green,
            TriageLevel::NonUrgent => TriageColor::Blue,
        }
    }
}

impl std::fmt::Display for TriageLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TriageLevel::Resuscitation => write!(f, "resuscitation"),
            TriageLevel::Emergency => write!(f, "emergency"),
            TriageLevel::Urgent => write!(f, "urgent"),
            TriageLevel::SemiUrgent => write!(f, "semi-urgent"),
            TriageLevel::NonUrgent => write!(f, "non-urgent"),
        }
    }
}

impl FromStr for TriageLevel {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "resuscitation" => Ok(TriageLevel::Resuscitation),
            "emergency" => Ok(TriageLevel::Emergency),
            "urgent" => Ok(TriageLevel::Urgent),
            "semi-urgent" => Ok(TriageLevel::SemiUrgent),
            "non-urgent" => Ok(TriageLevel::NonUrgent),
            other => Err(ParseEnumError {
                kind: "triage level",
                value: other.to_string(),
            }),
        }
    }
}

/// Display color of a triage level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriageColor {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
}

impl std::fmt::Display for TriageColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TriageColor::Red => write!(f, "red"),
            TriageColor::Orange => write!(f, "orange"),
            TriageColor::Yellow => write!(f, "yellow"),
            TriageColor::Green => write!(f, "green"),
            TriageColor::Blue => write!(f, "blue"),
        }
    }
}

impl FromStr for TriageColor {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "red" => Ok(TriageColor::Red),
            "orange" => Ok(TriageColor::Orange),
            "yellow" => Ok(TriageColor::Yellow),
            "green" => Ok(TriageColor::Green),
            "blue" => Ok(TriageColor::Blue),
            other => Err(ParseEnumError {
                kind: "triage color",
                value: other.to_string(),
            }),
        }
    }
}

/// Outcome of one triage decision
///
/// Produced fresh per assessment and persisted verbatim; there is no
/// independent lifecycle across assessments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageResult {
    /// Assigned urgency level
    pub level: TriageLevel,
    /// Display color matching the level
    pub color: TriageColor,
    /// Numeric priority, 0-100
    pub priority_score: i32,
    /// Ordered list of immediate actions for the assigned tier
    pub immediate_actions: Vec<String>,
    /// Ordered monitoring plan keyed by the assigned level
    pub monitoring_plan: Vec<String>,
    /// Ordered list of required investigations for the assigned tier
    pub investigations_needed: Vec<String>,
    /// Whether escalation to a senior clinician is mandatory
    pub escalation_required: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consciousness_level_round_trips_through_display() {
        for level in [
            ConsciousnessLevel::Alert,
            ConsciousnessLevel::Voice,
            ConsciousnessLevel::Pain,
            ConsciousnessLevel::Unresponsive,
        ] {
            let parsed: ConsciousnessLevel = level.to_string().parse().unwrap();
            assert_eq!(parsed, level);
        }
    }

    #[test]
    fn triage_level_serializes_kebab_case() {
        let json = serde_json::to_string(&TriageLevel::SemiUrgent).unwrap();
        assert_eq!(json, "\"semi-urgent\"");
        let json = serde_json::to_string(&TriageLevel::NonUrgent).unwrap();
        assert_eq!(json, "\"non-urgent\"");
    }

    #[test]
    fn triage_level_round_trips_through_display() {
        for level in [
            TriageLevel::Resuscitation,
            TriageLevel::Emergency,
            TriageLevel::Urgent,
            TriageLevel::SemiUrgent,
            TriageLevel::NonUrgent,
        ] {
            let parsed: TriageLevel = level.to_string().parse().unwrap();
            assert_eq!(parsed, level);
            let parsed: TriageColor = level.color().to_string().parse().unwrap();
            assert_eq!(parsed, level.color());
        }
    }

    #[test]
    fn unknown_level_is_rejected() {
        let err = "critical".parse::<TriageLevel>().unwrap_err();
        assert!(err.to_string().contains("critical"));
    }

    #[test]
    fn vitals_accept_camel_case_payload() {
        let vitals: VitalSigns = serde_json::from_str(
            r#"{
                "respiratoryRate": 18,
                "spo2": 97,
                "heartRate": 72,
                "systolicBP": 120,
                "temperature": 36.6,
                "consciousnessLevel": "alert"
            }"#,
        )
        .unwrap();
        assert_eq!(vitals.respiratory_rate, 18);
        assert!(!vitals.oxygen_supplementation);
        assert_eq!(vitals.gcs_score, None);
    }
}
