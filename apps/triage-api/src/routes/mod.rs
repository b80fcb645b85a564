//! Router assembly

use axum::routing::{get, post};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;

pub mod triage;
pub mod ui;

/// Builds the application router: the JSON API under /api/triage plus
/// the form UI shell at the root
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/assess", post(triage::assess))
        .route("/patients", get(triage::patients))
        .route("/patient/:patient_id", get(triage::patient_details))
        .route("/stats", get(triage::stats))
        .layer(CorsLayer::permissive());

    Router::new()
        .route("/", get(ui::index))
        .route("/static/app.js", get(ui::app_js))
        .nest("/api/triage", api)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .with_state(state)
}
