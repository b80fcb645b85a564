//! Triage assessment endpoints
//!
//! One POST computes and persists an assessment; three GETs serve the
//! list, detail and statistics views. Scoring happens in `triage-core`,
//! persistence in `common-db`; these handlers are glue.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use common_db::models::NewPatient;
use common_db::queries;
use triage_core::{
    determine_triage, ClinicalFeatures, ConsciousnessLevel, TriageResult, TriageScores, VitalSigns,
};

use crate::error::ApiError;
use crate::AppState;

/// Patient identity block of an assessment submission
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PatientPayload {
    /// External patient identifier; required and non-empty
    #[validate(length(min = 1, max = 64))]
    pub patient_id: String,
    #[serde(default)]
    #[validate(range(min = 0, max = 130))]
    pub age: Option<i32>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub arrival_mode: Option<String>,
    #[serde(default)]
    pub chief_complaint: Option<String>,
}

impl PatientPayload {
    fn into_new_patient(self) -> NewPatient {
        NewPatient {
            patient_id: self.patient_id,
            age: self.age,
            gender: self.gender,
            arrival_mode: self.arrival_mode,
            chief_complaint: self.chief_complaint,
        }
    }
}

/// Vitals block of an assessment submission
///
/// Plausibility ranges only; anything inside them is scored as-is.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VitalsPayload {
    #[validate(range(min = 0, max = 99))]
    pub respiratory_rate: i32,
    #[validate(range(min = 0, max = 100))]
    pub spo2: i32,
    #[serde(default)]
    pub oxygen_supplementation: bool,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 60.0))]
    pub oxygen_flow: Option<f64>,
    #[validate(range(min = 0, max = 300))]
    pub heart_rate: i32,
    #[serde(rename = "systolicBP")]
    #[validate(range(min = 0, max = 350))]
    pub systolic_bp: i32,
    #[serde(default, rename = "diastolicBP")]
    #[validate(range(min = 0, max = 250))]
    pub diastolic_bp: Option<i32>,
    #[validate(range(min = 25.0, max = 45.0))]
    pub temperature: f64,
    pub consciousness_level: ConsciousnessLevel,
    #[serde(default)]
    #[validate(range(min = 3, max = 15))]
    pub gcs_score: Option<i32>,
}

impl VitalsPayload {
    fn into_vitals(self) -> VitalSigns {
        VitalSigns {
            respiratory_rate: self.respiratory_rate,
            spo2: self.spo2,
            oxygen_supplementation: self.oxygen_supplementation,
            oxygen_flow: self.oxygen_flow,
            heart_rate: self.heart_rate,
            systolic_bp: self.systolic_bp,
            diastolic_bp: self.diastolic_bp,
            temperature: self.temperature,
            consciousness_level: self.consciousness_level,
            gcs_score: self.gcs_score,
        }
    }
}

/// Full assessment submission
///
/// Identity, vitals and the feature block are required; a submission
/// without them is rejected before any computation or write.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AssessRequest {
    #[validate]
    pub patient: PatientPayload,
    #[validate]
    pub vitals: VitalsPayload,
    pub features: ClinicalFeatures,
    #[serde(default)]
    pub assessed_by: Option<String>,
}

/// Successful assessment response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessResponse {
    pub success: bool,
    pub patient_id: String,
    pub assessment_id: Uuid,
    pub scores: TriageScores,
    pub triage: TriageResult,
}

/// POST /api/triage/assess
pub async fn assess(
    State(state): State<AppState>,
    Json(payload): Json<AssessRequest>,
) -> Result<Json<AssessResponse>, ApiError> {
    payload.validate()?;

    let features = payload.features;
    let vitals = payload.vitals.into_vitals();
    let scores = TriageScores::from_vitals(&vitals);
    let triage = determine_triage(&scores, &vitals, &features);

    let patient = payload.patient.into_new_patient();
    let recorded = queries::record_assessment(
        &state.pool,
        &patient,
        &vitals,
        &features,
        &scores,
        &triage,
        payload.assessed_by.as_deref(),
    )
    .await?;

    info!(
        patient_id = %patient.patient_id,
        level = %triage.level,
        priority = triage.priority_score,
        "assessment recorded"
    );

    Ok(Json(AssessResponse {
        success: true,
        patient_id: patient.patient_id,
        assessment_id: recorded.assessment_id,
        scores,
        triage,
    }))
}

/// Pagination parameters of the list view
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/triage/patients
pub async fn patients(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, ApiError> {
    let limit = params.limit.unwrap_or(50).clamp(1, 200);
    let offset = params.offset.unwrap_or(0).max(0);

    let patients = queries::list_patients(&state.pool, limit, offset).await?;
    Ok(Json(json!({ "success": true, "patients": patients })))
}

/// GET /api/triage/patient/:patient_id
pub async fn patient_details(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let patient = queries::find_patient(&state.pool, &patient_id)
        .await?
        .ok_or(ApiError::PatientNotFound(patient_id))?;

    let assessments = queries::list_assessments(&state.pool, patient.id).await?;
    let logs = queries::list_logs(&state.pool, patient.id).await?;

    Ok(Json(json!({
        "success": true,
        "patient": patient,
        "assessments": assessments,
        "logs": logs,
    })))
}

/// GET /api/triage/stats
pub async fn stats(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let stats = queries::collect_stats(&state.pool).await?;
    Ok(Json(json!({ "success": true, "stats": stats })))
}
