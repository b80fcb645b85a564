//! Router-level tests driving the full stack against a scratch database

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use common_db::{init_db_pool, DbConfig};
use triage_api::app;

async fn test_app() -> (TempDir, Router) {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_path = temp_dir.path().join("api_test.db");

    let pool = init_db_pool(&DbConfig {
        db_path: db_path.to_str().unwrap().to_string(),
        max_connections: 2,
    })
    .await
    .unwrap();

    (temp_dir, app(pool))
}

fn assess_body(patient_id: &str, respiratory_rate: i64) -> Value {
    json!({
        "patient": {
            "patientId": patient_id,
            "age": 61,
            "gender": "female",
            "arrivalMode": "ambulance",
            "chiefComplaint": "shortness of breath"
        },
        "vitals": {
            "respiratoryRate": respiratory_rate,
            "spo2": 100,
            "oxygenSupplementation": false,
            "heartRate": 80,
            "systolicBP": 120,
            "temperature": 37.0,
            "consciousnessLevel": "alert"
        },
        "features": {},
        "assessedBy": "nurse-12"
    })
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn assess_returns_scores_and_triage() {
    let (_guard, app) = test_app().await;

    let response = app
        .oneshot(post_json("/api/triage/assess", &assess_body("P-100", 30)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["patientId"], json!("P-100"));
    assert!(body["assessmentId"].is_string());
    assert_eq!(body["scores"]["news"], json!(3));
    assert_eq!(body["scores"]["mews"], json!(3));
    assert_eq!(body["scores"]["qsofa"], json!(1));
    assert_eq!(body["triage"]["level"], json!("urgent"));
    assert_eq!(body["triage"]["color"], json!("yellow"));
    assert_eq!(body["triage"]["priorityScore"], json!(50));
    assert_eq!(body["triage"]["escalationRequired"], json!(false));
    assert!(body["triage"]["immediateActions"].as_array().unwrap().len() > 0);
}

#[tokio::test]
async fn missing_vitals_is_rejected_without_writes() {
    let (_guard, app) = test_app().await;

    let mut body = assess_body("P-200", 16);
    body.as_object_mut().unwrap().remove("vitals");

    let response = app
        .clone()
        .oneshot(post_json("/api/triage/assess", &body))
        .await
        .unwrap();
    assert!(response.status().is_client_error());

    // nothing must have been persisted
    let response = app.oneshot(get("/api/triage/patients")).await.unwrap();
    let body = json_body(response).await;
    assert_eq!(body["patients"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn out_of_range_vitals_are_rejected() {
    let (_guard, app) = test_app().await;

    let mut body = assess_body("P-300", 16);
    body["vitals"]["spo2"] = json!(150);

    let response = app
        .oneshot(post_json("/api/triage/assess", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("validation"));
}

#[tokio::test]
async fn patient_detail_includes_history_and_logs() {
    let (_guard, app) = test_app().await;

    let response = app
        .clone()
        .oneshot(post_json("/api/triage/assess", &assess_body("P-400", 30)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get("/api/triage/patient/P-400"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["patient"]["patientId"], json!("P-400"));
    assert_eq!(body["assessments"].as_array().unwrap().len(), 1);
    let logs = body["logs"].as_array().unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0]["action"], json!("ASSESSMENT_CREATED"));
    assert_eq!(logs[0]["userId"], json!("nurse-12"));
}

#[tokio::test]
async fn unknown_patient_is_not_found() {
    let (_guard, app) = test_app().await;

    let response = app.oneshot(get("/api/triage/patient/P-MISSING")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("P-MISSING"));
}

#[tokio::test]
async fn patients_list_shows_latest_state() {
    let (_guard, app) = test_app().await;

    app.clone()
        .oneshot(post_json("/api/triage/assess", &assess_body("P-500", 12)))
        .await
        .unwrap();
    app.clone()
        .oneshot(post_json("/api/triage/assess", &assess_body("P-500", 30)))
        .await
        .unwrap();

    let response = app.oneshot(get("/api/triage/patients")).await.unwrap();
    let body = json_body(response).await;
    let patients = body["patients"].as_array().unwrap();
    assert_eq!(patients.len(), 1);
    assert_eq!(patients[0]["patientId"], json!("P-500"));
    assert_eq!(patients[0]["triageLevel"], json!("urgent"));
    assert_eq!(patients[0]["newsScore"], json!(3));
}

#[tokio::test]
async fn stats_reflect_current_assessments() {
    let (_guard, app) = test_app().await;

    app.clone()
        .oneshot(post_json("/api/triage/assess", &assess_body("P-600", 12)))
        .await
        .unwrap();
    app.clone()
        .oneshot(post_json("/api/triage/assess", &assess_body("P-601", 30)))
        .await
        .unwrap();

    let response = app.oneshot(get("/api/triage/stats")).await.unwrap();
    let body = json_body(response).await;
    assert_eq!(body["stats"]["totalPatients"], json!(2));
    assert_eq!(body["stats"]["bluePatients"], json!(1));
    assert_eq!(body["stats"]["yellowPatients"], json!(1));
}

#[tokio::test]
async fn index_serves_the_form_shell() {
    let (_guard, app) = test_app().await;

    let response = app.clone().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Anesthesiology Triage"));
    assert!(html.contains("/static/app.js"));

    let response = app.oneshot(get("/static/app.js")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("application/javascript"));
}
