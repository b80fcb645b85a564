//! Triage Core - decision engine for clinical urgency classification
//!
//! This library provides:
//! - Immutable input snapshots (vital signs, clinical feature flags)
//! - Three early-warning score calculators (NEWS, MEWS, qSOFA)
//! - The tier-cascade decision producing a full triage result
//!
//! Everything in this crate is pure and synchronous: one assessment in,
//! one result out. Persistence and transport live in other crates.

pub mod decision;
pub mod models;
pub mod scoring;

pub use decision::determine_triage;
pub use models::{
    ClinicalFeatures, ConsciousnessLevel, TriageColor, TriageLevel, TriageResult, TriageScores,
    VitalSigns,
};
pub use scoring::{calculate_mews, calculate_news, calculate_qsofa};
