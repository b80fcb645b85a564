//! Migration runner for the triage database
//!
//! Migrations are embedded SQL blocks applied sequentially, versioned
//! through PRAGMA user_version, each inside its own transaction.

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tracing::{error, info};

/// Ordered list of SQL migrations
const MIGRATIONS: &[&str] = &[
    // 001_initial_schema.sql
    r#"
    -- Registered patients; one row per external patient identifier
    CREATE TABLE IF NOT EXISTS patients (
        id TEXT PRIMARY KEY NOT NULL,
        patient_id TEXT NOT NULL UNIQUE,
        age INTEGER,
        gender TEXT,
        arrival_mode TEXT NOT NULL DEFAULT 'walking',
        chief_complaint TEXT,
        admission_time TIMESTAMP NOT NULL
    );

    -- One immutable row per triage assessment
    CREATE TABLE IF NOT EXISTS triage_assessments (
        id TEXT PRIMARY KEY NOT NULL,
        patient_id TEXT NOT NULL,
        respiratory_rate INTEGER NOT NULL,
        spo2 INTEGER NOT NULL,
        oxygen_supplementation INTEGER NOT NULL DEFAULT 0,
        oxygen_flow REAL,
        heart_rate INTEGER NOT NULL,
        systolic_bp INTEGER NOT NULL,
        diastolic_bp INTEGER,
        temperature REAL NOT NULL,
        consciousness_level TEXT NOT NULL
            CHECK (consciousness_level IN ('alert', 'voice', 'pain', 'unresponsive')),
        gcs_score INTEGER,
        chest_pain INTEGER NOT NULL DEFAULT 0,
        dyspnea INTEGER NOT NULL DEFAULT 0,
        trauma INTEGER NOT NULL DEFAULT 0,
        bleeding INTEGER NOT NULL DEFAULT 0,
        seizures INTEGER NOT NULL DEFAULT 0,
        altered_mental_status INTEGER NOT NULL DEFAULT 0,
        news_score INTEGER NOT NULL,
        mews_score INTEGER NOT NULL,
        qsofa_score INTEGER NOT NULL,
        triage_level TEXT NOT NULL
            CHECK (triage_level IN ('resuscitation', 'emergency', 'urgent', 'semi-urgent', 'non-urgent')),
        triage_color TEXT NOT NULL
            CHECK (triage_color IN ('red', 'orange', 'yellow', 'green', 'blue')),
        priority_score INTEGER NOT NULL,
        immediate_actions TEXT NOT NULL,      -- JSON array
        monitoring_plan TEXT NOT NULL,        -- JSON array
        investigations_needed TEXT NOT NULL,  -- JSON array
        escalation_required INTEGER NOT NULL DEFAULT 0,
        assessed_by TEXT,
        assessment_time TIMESTAMP NOT NULL,
        FOREIGN KEY (patient_id) REFERENCES patients (id) ON DELETE CASCADE
    );

    -- Audit trail of assessment activity
    CREATE TABLE IF NOT EXISTS triage_logs (
        id TEXT PRIMARY KEY NOT NULL,
        patient_id TEXT NOT NULL,
        assessment_id TEXT,
        action TEXT NOT NULL,
        details TEXT,
        user_id TEXT,
        timestamp TIMESTAMP NOT NULL,
        FOREIGN KEY (patient_id) REFERENCES patients (id) ON DELETE CASCADE,
        FOREIGN KEY (assessment_id) REFERENCES triage_assessments (id) ON DELETE SET NULL
    );

    CREATE INDEX IF NOT EXISTS idx_assessments_patient_id ON triage_assessments (patient_id);
    CREATE INDEX IF NOT EXISTS idx_assessments_patient_time ON triage_assessments (patient_id, assessment_time);
    CREATE INDEX IF NOT EXISTS idx_assessments_priority ON triage_assessments (priority_score);
    CREATE INDEX IF NOT EXISTS idx_logs_patient_id ON triage_logs (patient_id);
    CREATE INDEX IF NOT EXISTS idx_logs_timestamp ON triage_logs (timestamp);
    "#,
];

/// Applies all pending migrations to the database
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    info!("applying database migrations");

    let mut version: i64 = 0;
    match sqlx::query_scalar("PRAGMA user_version").fetch_one(pool).await {
        Ok(v) => version = v,
        Err(e) => {
            // May be the very first run; keep going
            error!("failed to read database version: {}", e);
        }
    }

    info!("current database version: {}", version);

    for (i, migration_sql) in MIGRATIONS.iter().enumerate() {
        let migration_version = (i + 1) as i64;

        if migration_version <= version {
            info!("migration {} already applied", migration_version);
            continue;
        }

        info!("applying migration {}", migration_version);

        let mut transaction = pool
            .begin()
            .await
            .context(format!("failed to begin transaction for migration {}", migration_version))?;

        sqlx::query(migration_sql)
            .execute(&mut *transaction)
            .await
            .context(format!("failed to execute migration {}", migration_version))?;

        sqlx::query(&format!("PRAGMA user_version = {}", migration_version))
            .execute(&mut *transaction)
            .await
            .context(format!("failed to bump version to {}", migration_version))?;

        transaction
            .commit()
            .await
            .context(format!("failed to commit migration {}", migration_version))?;

        info!("migration {} applied", migration_version);
    }

    info!("migrations complete, version {}", MIGRATIONS.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqliteConnectOptions;
    use sqlx::SqlitePool;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_migrations() -> Result<()> {
        let temp_dir = tempdir()?;
        let db_path = temp_dir.path().join("test_migrations.db");

        let conn_options = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(true);

        let pool = SqlitePool::connect_with(conn_options).await?;

        run_migrations(&pool).await?;

        let version: i64 = sqlx::query_scalar("PRAGMA user_version")
            .fetch_one(&pool)
            .await?;
        assert_eq!(version, MIGRATIONS.len() as i64);

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        )
        .fetch_all(&pool)
        .await?;

        assert!(tables.contains(&"patients".to_string()));
        assert!(tables.contains(&"triage_assessments".to_string()));
        assert!(tables.contains(&"triage_logs".to_string()));

        // Re-running must be a no-op
        run_migrations(&pool).await?;
        let version: i64 = sqlx::query_scalar("PRAGMA user_version")
            .fetch_one(&pool)
            .await?;
        assert_eq!(version, MIGRATIONS.len() as i64);

        Ok(())
    }
}
