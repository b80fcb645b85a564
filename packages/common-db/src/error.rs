//! Error definitions for the common-db library

use thiserror::Error;

/// Errors raised by database operations
#[derive(Error, Debug)]
pub enum DbError {
    #[error("database connection error: {0}")]
    ConnectionError(String),

    #[error("migration error: {0}")]
    MigrationError(String),

    #[error("query error: {0}")]
    QueryError(String),

    #[error("entity not found: {0}")]
    NotFound(String),

    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("serialization error: {0}")]
    SerializationError(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

/// Maps sqlx errors onto the library error type
impl From<sqlx::Error> for DbError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => DbError::NotFound("row not found".to_string()),
            sqlx::Error::Database(dbe) => {
                if let Some(code) = dbe.code() {
                    // SQLite constraint violation codes
                    if code.as_ref() == "23000" || code.as_ref() == "2067" || code.as_ref() == "1555"
                    {
                        return DbError::ConstraintViolation(dbe.message().to_string());
                    }
                }
                DbError::QueryError(dbe.message().to_string())
            }
            sqlx::Error::ColumnNotFound(col) => {
                DbError::QueryError(format!("column not found: {}", col))
            }
            sqlx::Error::TypeNotFound { type_name } => {
                DbError::QueryError(format!("type not found: {}", type_name))
            }
            sqlx::Error::ColumnDecode { index, source } => {
                DbError::QueryError(format!("failed to decode column {}: {}", index, source))
            }
            sqlx::Error::Io(io_err) => DbError::ConnectionError(io_err.to_string()),
            sqlx::Error::Configuration(conf_err) => DbError::ConnectionError(conf_err.to_string()),
            sqlx::Error::PoolClosed => DbError::ConnectionError("connection pool closed".to_string()),
            sqlx::Error::PoolTimedOut => {
                DbError::ConnectionError("connection pool timed out".to_string())
            }
            sqlx::Error::WorkerCrashed => {
                DbError::InternalError("database worker crashed".to_string())
            }
            _ => DbError::InternalError(format!("unexpected error: {:?}", error)),
        }
    }
}

impl From<serde_json::Error> for DbError {
    fn from(error: serde_json::Error) -> Self {
        DbError::SerializationError(error.to_string())
    }
}
