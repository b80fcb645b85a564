//! Row models shared between the persistence layer and the web service
//!
//! Assessment rows compose the engine types from `triage-core`; vitals,
//! feature flags and the triage outcome are flattened into columns on
//! write and rebuilt here on read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};
use triage_core::{
    ClinicalFeatures, TriageColor, TriageLevel, TriageResult, TriageScores, VitalSigns,
};
use uuid::Uuid;

/// Wraps a parse failure into the sqlx column-decode error shape
fn decode_error(
    column: &str,
    source: impl std::error::Error + Send + Sync + 'static,
) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(source),
    }
}

/// Reads a JSON-encoded list column
fn json_list(row: &SqliteRow, column: &str) -> sqlx::Result<Vec<String>> {
    let raw: String = row.try_get(column)?;
    serde_json::from_str(&raw).map_err(|e| decode_error(column, e))
}

/// Patient registration data accepted with an assessment submission
#[derive(Debug, Clone)]
pub struct NewPatient {
    /// External patient identifier (unique business key)
    pub patient_id: String,
    /// Age in years
    pub age: Option<i32>,
    /// Free-text gender
    pub gender: Option<String>,
    /// How the patient arrived; defaults to "walking"
    pub arrival_mode: Option<String>,
    /// Presenting complaint
    pub chief_complaint: Option<String>,
}

/// A registered patient
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Surrogate identifier
    pub id: Uuid,
    /// External patient identifier
    pub patient_id: String,
    /// Age in years
    pub age: Option<i32>,
    /// Free-text gender
    pub gender: Option<String>,
    /// How the patient arrived
    pub arrival_mode: String,
    /// Presenting complaint
    pub chief_complaint: Option<String>,
    /// Last registration time, refreshed on re-submission
    pub admission_time: DateTime<Utc>,
}

impl FromRow<'_, SqliteRow> for Patient {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            patient_id: row.try_get("patient_id")?,
            age: row.try_get("age")?,
            gender: row.try_get("gender")?,
            arrival_mode: row.try_get("arrival_mode")?,
            chief_complaint: row.try_get("chief_complaint")?,
            admission_time: row.try_get("admission_time")?,
        })
    }
}

/// One persisted triage assessment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageAssessment {
    /// Surrogate identifier
    pub id: Uuid,
    /// Surrogate id of the owning patient
    pub patient_id: Uuid,
    /// Vitals snapshot taken at assessment time
    pub vitals: VitalSigns,
    /// Clinical feature flags observed at assessment time
    pub features: ClinicalFeatures,
    /// The three early-warning scores
    pub scores: TriageScores,
    /// The triage outcome, stored verbatim
    pub triage: TriageResult,
    /// Identifier of the assessing clinician
    pub assessed_by: Option<String>,
    /// When the assessment was recorded
    pub assessment_time: DateTime<Utc>,
}

impl FromRow<'_, SqliteRow> for TriageAssessment {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        let consciousness: String = row.try_get("consciousness_level")?;
        let vitals = VitalSigns {
            respiratory_rate: row.try_get("respiratory_rate")?,
            spo2: row.try_get("spo2")?,
            oxygen_supplementation: row.try_get("oxygen_supplementation")?,
            oxygen_flow: row.try_get("oxygen_flow")?,
            heart_rate: row.try_get("heart_rate")?,
            systolic_bp: row.try_get("systolic_bp")?,
            diastolic_bp: row.try_get("diastolic_bp")?,
            temperature: row.try_get("temperature")?,
            consciousness_level: consciousness
                .parse()
                .map_err(|e| decode_error("consciousness_level", e))?,
            gcs_score: row.try_get("gcs_score")?,
        };

        let features = ClinicalFeatures {
            chest_pain: row.try_get("chest_pain")?,
            dyspnea: row.try_get("dyspnea")?,
            trauma: row.try_get("trauma")?,
            bleeding: row.try_get("bleeding")?,
            seizures: row.try_get("seizures")?,
            altered_mental_status: row.try_get("altered_mental_status")?,
        };

        let scores = TriageScores {
            news: row.try_get("news_score")?,
            mews: row.try_get("mews_score")?,
            qsofa: row.try_get("qsofa_score")?,
        };

        let level: String = row.try_get("triage_level")?;
        let color: String = row.try_get("triage_color")?;
        let triage = TriageResult {
            level: level.parse().map_err(|e| decode_error("triage_level", e))?,
            color: color.parse().map_err(|e| decode_error("triage_color", e))?,
            priority_score: row.try_get("priority_score")?,
            immediate_actions: json_list(row, "immediate_actions")?,
            monitoring_plan: json_list(row, "monitoring_plan")?,
            investigations_needed: json_list(row, "investigations_needed")?,
            escalation_required: row.try_get("escalation_required")?,
        };

        Ok(Self {
            id: row.try_get("id")?,
            patient_id: row.try_get("patient_id")?,
            vitals,
            features,
            scores,
            triage,
            assessed_by: row.try_get("assessed_by")?,
            assessment_time: row.try_get("assessment_time")?,
        })
    }
}

/// One audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentLog {
    /// Surrogate identifier
    pub id: Uuid,
    /// Surrogate id of the owning patient
    pub patient_id: Uuid,
    /// Assessment this entry refers to, when applicable
    pub assessment_id: Option<Uuid>,
    /// Action tag, e.g. ASSESSMENT_CREATED
    pub action: String,
    /// Free-text details
    pub details: Option<String>,
    /// Identifier of the acting user
    pub user_id: Option<String>,
    /// When the entry was written
    pub timestamp: DateTime<Utc>,
}

impl FromRow<'_, SqliteRow> for AssessmentLog {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            patient_id: row.try_get("patient_id")?,
            assessment_id: row.try_get("assessment_id")?,
            action: row.try_get("action")?,
            details: row.try_get("details")?,
            user_id: row.try_get("user_id")?,
            timestamp: row.try_get("timestamp")?,
        })
    }
}

/// List-view row: a patient joined to their most recent assessment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientSummary {
    /// Surrogate identifier
    pub id: Uuid,
    /// External patient identifier
    pub patient_id: String,
    /// Age in years
    pub age: Option<i32>,
    /// Free-text gender
    pub gender: Option<String>,
    /// How the patient arrived
    pub arrival_mode: String,
    /// Presenting complaint
    pub chief_complaint: Option<String>,
    /// Last registration time
    pub admission_time: DateTime<Utc>,
    /// Level of the latest assessment
    pub triage_level: TriageLevel,
    /// Color of the latest assessment
    pub triage_color: TriageColor,
    /// Priority of the latest assessment
    pub priority_score: i32,
    /// NEWS of the latest assessment
    pub news_score: i32,
    /// MEWS of the latest assessment
    pub mews_score: i32,
    /// qSOFA of the latest assessment
    pub qsofa_score: i32,
    /// When the latest assessment was recorded
    pub assessment_time: DateTime<Utc>,
}

impl FromRow<'_, SqliteRow> for PatientSummary {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        let level: String = row.try_get("triage_level")?;
        let color: String = row.try_get("triage_color")?;
        Ok(Self {
            id: row.try_get("id")?,
            patient_id: row.try_get("patient_id")?,
            age: row.try_get("age")?,
            gender: row.try_get("gender")?,
            arrival_mode: row.try_get("arrival_mode")?,
            chief_complaint: row.try_get("chief_complaint")?,
            admission_time: row.try_get("admission_time")?,
            triage_level: level.parse().map_err(|e| decode_error("triage_level", e))?,
            triage_color: color.parse().map_err(|e| decode_error("triage_color", e))?,
            priority_score: row.try_get("priority_score")?,
            news_score: row.try_get("news_score")?,
            mews_score: row.try_get("mews_score")?,
            qsofa_score: row.try_get("qsofa_score")?,
            assessment_time: row.try_get("assessment_time")?,
        })
    }
}

/// Aggregate dashboard numbers over each patient's latest assessment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageStatistics {
    /// Number of patients with at least one assessment
    pub total_patients: i64,
    /// Patients currently red
    pub red_patients: i64,
    /// Patients currently orange
    pub orange_patients: i64,
    /// Patients currently yellow
    pub yellow_patients: i64,
    /// Patients currently green
    pub green_patients: i64,
    /// Patients currently blue
    pub blue_patients: i64,
    /// Mean NEWS over current assessments
    pub avg_news: Option<f64>,
    /// Mean MEWS over current assessments
    pub avg_mews: Option<f64>,
    /// Mean priority over current assessments
    pub avg_priority: Option<f64>,
}

impl FromRow<'_, SqliteRow> for TriageStatistics {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            total_patients: row.try_get("total_patients")?,
            red_patients: row.try_get("red_patients")?,
            orange_patients: row.try_get("orange_patients")?,
            yellow_patients: row.try_get("yellow_patients")?,
            green_patients: row.try_get("green_patients")?,
            blue_patients: row.try_get("blue_patients")?,
            avg_news: row.try_get("avg_news")?,
            avg_mews: row.try_get("avg_mews")?,
            avg_priority: row.try_get("avg_priority")?,
        })
    }
}
