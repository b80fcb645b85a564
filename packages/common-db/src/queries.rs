//! Query layer for the triage service
//!
//! One submission produces a patient upsert, an assessment insert and an
//! audit log entry, all inside a single transaction. Assessment rows are
//! immutable once written; "current" state for list and stats views is
//! always the most recent assessment per patient.

use chrono::Utc;
use sqlx::{Sqlite, SqlitePool, Transaction};
use uuid::Uuid;

use crate::error::DbError;
use crate::models::{
    AssessmentLog, NewPatient, Patient, PatientSummary, TriageAssessment, TriageStatistics,
};
use triage_core::{ClinicalFeatures, TriageResult, TriageScores, VitalSigns};

/// Audit action written when an assessment is recorded
pub const ACTION_ASSESSMENT_CREATED: &str = "ASSESSMENT_CREATED";

/// Identifiers generated while recording one assessment
#[derive(Debug, Clone, Copy)]
pub struct RecordedAssessment {
    /// Surrogate id of the (possibly pre-existing) patient
    pub patient_uuid: Uuid,
    /// Id of the freshly inserted assessment row
    pub assessment_id: Uuid,
}

/// Records one assessment: patient upsert, assessment insert and audit
/// log entry in a single transaction. A failure anywhere rolls back all
/// three writes.
pub async fn record_assessment(
    pool: &SqlitePool,
    patient: &NewPatient,
    vitals: &VitalSigns,
    features: &ClinicalFeatures,
    scores: &TriageScores,
    triage: &TriageResult,
    assessed_by: Option<&str>,
) -> Result<RecordedAssessment, DbError> {
    let mut tx = pool.begin().await?;

    let patient_uuid = upsert_patient(&mut tx, patient).await?;
    let assessment_id =
        insert_assessment(&mut tx, patient_uuid, vitals, features, scores, triage, assessed_by)
            .await?;

    let details = format!(
        "Triage level: {}, priority: {}",
        triage.level, triage.priority_score
    );
    insert_log(
        &mut tx,
        patient_uuid,
        Some(assessment_id),
        ACTION_ASSESSMENT_CREATED,
        Some(&details),
        assessed_by,
    )
    .await?;

    tx.commit().await?;

    Ok(RecordedAssessment {
        patient_uuid,
        assessment_id,
    })
}

/// Inserts or refreshes a patient row, preserving the surrogate id of an
/// existing registration
async fn upsert_patient(
    tx: &mut Transaction<'_, Sqlite>,
    patient: &NewPatient,
) -> Result<Uuid, DbError> {
    let id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO patients (id, patient_id, age, gender, arrival_mode, chief_complaint, admission_time)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(patient_id) DO UPDATE SET
            age = excluded.age,
            gender = excluded.gender,
            arrival_mode = excluded.arrival_mode,
            chief_complaint = excluded.chief_complaint,
            admission_time = excluded.admission_time
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&patient.patient_id)
    .bind(patient.age)
    .bind(&patient.gender)
    .bind(patient.arrival_mode.as_deref().unwrap_or("walking"))
    .bind(&patient.chief_complaint)
    .bind(Utc::now())
    .fetch_one(&mut **tx)
    .await?;

    Ok(id)
}

/// Inserts one immutable assessment row
async fn insert_assessment(
    tx: &mut Transaction<'_, Sqlite>,
    patient_uuid: Uuid,
    vitals: &VitalSigns,
    features: &ClinicalFeatures,
    scores: &TriageScores,
    triage: &TriageResult,
    assessed_by: Option<&str>,
) -> Result<Uuid, DbError> {
    let id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO triage_assessments (
            id, patient_id,
            respiratory_rate, spo2, oxygen_supplementation, oxygen_flow,
            heart_rate, systolic_bp, diastolic_bp, temperature, consciousness_level, gcs_score,
            chest_pain, dyspnea, trauma, bleeding, seizures, altered_mental_status,
            news_score, mews_score, qsofa_score,
            triage_level, triage_color, priority_score,
            immediate_actions, monitoring_plan, investigations_needed, escalation_required,
            assessed_by, assessment_time
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(patient_uuid)
    .bind(vitals.respiratory_rate)
    .bind(vitals.spo2)
    .bind(vitals.oxygen_supplementation)
    .bind(vitals.oxygen_flow)
    .bind(vitals.heart_rate)
    .bind(vitals.systolic_bp)
    .bind(vitals.diastolic_bp)
    .bind(vitals.temperature)
    .bind(vitals.consciousness_level.to_string())
    .bind(vitals.gcs_score)
    .bind(features.chest_pain)
    .bind(features.dyspnea)
    .bind(features.trauma)
    .bind(features.bleeding)
    .bind(features.seizures)
    .bind(features.altered_mental_status)
    .bind(scores.news)
    .bind(scores.mews)
    .bind(scores.qsofa)
    .bind(triage.level.to_string())
    .bind(triage.color.to_string())
    .bind(triage.priority_score)
    .bind(serde_json::to_string(&triage.immediate_actions)?)
    .bind(serde_json::to_string(&triage.monitoring_plan)?)
    .bind(serde_json::to_string(&triage.investigations_needed)?)
    .bind(triage.escalation_required)
    .bind(assessed_by)
    .bind(Utc::now())
    .execute(&mut **tx)
    .await?;

    Ok(id)
}

/// Appends one audit log entry
async fn insert_log(
    tx: &mut Transaction<'_, Sqlite>,
    patient_uuid: Uuid,
    assessment_id: Option<Uuid>,
    action: &str,
    details: Option<&str>,
    user_id: Option<&str>,
) -> Result<(), DbError> {
    sqlx::query(
        r#"
        INSERT INTO triage_logs (id, patient_id, assessment_id, action, details, user_id, timestamp)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(patient_uuid)
    .bind(assessment_id)
    .bind(action)
    .bind(details)
    .bind(user_id)
    .bind(Utc::now())
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// Lists patients joined to their most recent assessment, most urgent
/// first
pub async fn list_patients(
    pool: &SqlitePool,
    limit: i64,
    offset: i64,
) -> Result<Vec<PatientSummary>, DbError> {
    let rows = sqlx::query_as::<_, PatientSummary>(
        r#"
        SELECT
            p.id, p.patient_id, p.age, p.gender, p.arrival_mode,
            p.chief_complaint, p.admission_time,
            t.triage_level, t.triage_color, t.priority_score,
            t.news_score, t.mews_score, t.qsofa_score, t.assessment_time
        FROM patients p
        JOIN triage_assessments t ON t.patient_id = p.id
        WHERE t.id = (
            SELECT id FROM triage_assessments
            WHERE patient_id = p.id
            ORDER BY assessment_time DESC
            LIMIT 1
        )
        ORDER BY t.priority_score DESC, p.admission_time DESC
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Looks a patient up by the external identifier
pub async fn find_patient(pool: &SqlitePool, patient_id: &str) -> Result<Option<Patient>, DbError> {
    let patient = sqlx::query_as::<_, Patient>("SELECT * FROM patients WHERE patient_id = ?")
        .bind(patient_id)
        .fetch_optional(pool)
        .await?;

    Ok(patient)
}

/// Returns the full assessment history of one patient, newest first
pub async fn list_assessments(
    pool: &SqlitePool,
    patient_uuid: Uuid,
) -> Result<Vec<TriageAssessment>, DbError> {
    let rows = sqlx::query_as::<_, TriageAssessment>(
        "SELECT * FROM triage_assessments WHERE patient_id = ? ORDER BY assessment_time DESC",
    )
    .bind(patient_uuid)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns the audit log of one patient, newest first
pub async fn list_logs(
    pool: &SqlitePool,
    patient_uuid: Uuid,
) -> Result<Vec<AssessmentLog>, DbError> {
    let rows = sqlx::query_as::<_, AssessmentLog>(
        "SELECT * FROM triage_logs WHERE patient_id = ? ORDER BY timestamp DESC",
    )
    .bind(patient_uuid)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Aggregates dashboard numbers over each patient's latest assessment
pub async fn collect_stats(pool: &SqlitePool) -> Result<TriageStatistics, DbError> {
    let stats = sqlx::query_as::<_, TriageStatistics>(
        r#"
        SELECT
            COUNT(DISTINCT p.id) AS total_patients,
            COALESCE(SUM(CASE WHEN t.triage_color = 'red' THEN 1 ELSE 0 END), 0) AS red_patients,
            COALESCE(SUM(CASE WHEN t.triage_color = 'orange' THEN 1 ELSE 0 END), 0) AS orange_patients,
            COALESCE(SUM(CASE WHEN t.triage_color = 'yellow' THEN 1 ELSE 0 END), 0) AS yellow_patients,
            COALESCE(SUM(CASE WHEN t.triage_color = 'green' THEN 1 ELSE 0 END), 0) AS green_patients,
            COALESCE(SUM(CASE WHEN t.triage_color = 'blue' THEN 1 ELSE 0 END), 0) AS blue_patients,
            AVG(t.news_score) AS avg_news,
            AVG(t.mews_score) AS avg_mews,
            AVG(t.priority_score) AS avg_priority
        FROM patients p
        JOIN triage_assessments t ON t.patient_id = p.id
        WHERE t.id = (
            SELECT id FROM triage_assessments
            WHERE patient_id = p.id
            ORDER BY assessment_time DESC
            LIMIT 1
        )
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(stats)
}
