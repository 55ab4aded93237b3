use sqlx::Error as SqlxError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] SqlxError),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Resource already exists: {0}")]
    AlreadyExists(String),
    #[error("Event capacity exceeded: {0}")]
    CapacityExceeded(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Notification failed: {0}")]
    Notification(String),
}

impl AppError {
    /// True when the wrapped database error is a unique-constraint violation.
    ///
    /// 2067 = SQLite Unique Constraint
    /// 1555 = SQLite Primary Key Constraint
    /// 23505 = PostgreSQL Unique Violation
    pub fn is_unique_violation(err: &SqlxError) -> bool {
        if let SqlxError::Database(db_err) = err {
            let code = db_err.code().unwrap_or_default();
            code == "2067" || code == "1555" || code == "23505"
        } else {
            false
        }
    }
}
