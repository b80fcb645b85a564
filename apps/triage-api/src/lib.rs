//! Triage API - web service for clinical urgency assessment
//!
//! This crate provides:
//! - The axum router with the /api/triage endpoints
//! - Request DTOs with payload validation
//! - The HTML shell and static script of the form UI

use axum::Router;
use sqlx::SqlitePool;

pub mod config;
pub mod error;
pub mod routes;

/// Shared application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub pool: SqlitePool,
}

/// Builds the full application router over an initialized pool
pub fn app(pool: SqlitePool) -> Router {
    routes::router(AppState { pool })
}
