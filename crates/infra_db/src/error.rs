//! Database error types
//!
//! Every `sqlx::Error` is classified here by PostgreSQL SQLSTATE before it
//! leaves the crate, and then flattened into a `PortError` at the adapter
//! boundary.

use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur during database operations
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to establish a database connection
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Entity not found in database
    #[error("Entity not found: {0}")]
    NotFound(String),

    /// Unique constraint violation
    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    /// Foreign key constraint violation
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Check constraint violation
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// A value the column type cannot hold
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// A stored value could not be mapped back into the domain
    #[error("Corrupt row: {0}")]
    CorruptRow(String),

    /// Migration error
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Pool exhaustion - no available connections
    #[error("Connection pool exhausted")]
    PoolExhausted,
}

impl DatabaseError {
    /// Creates a duplicate entry error
    pub fn duplicate(entity: &str, field: &str, value: impl std::fmt::Display) -> Self {
        DatabaseError::DuplicateEntry(format!(
            "{} with {} '{}' already exists",
            entity, field, value
        ))
    }

    /// Classifies a PostgreSQL error by its SQLSTATE code
    ///
    /// See <https://www.postgresql.org/docs/current/errcodes-appendix.html>.
    /// Class 22 (data exception) covers values the column cannot hold, such
    /// as numeric overflow or over-long strings.
    pub fn from_sqlstate(code: Option<&str>, message: String) -> Self {
        match code {
            Some("23505") => DatabaseError::DuplicateEntry(message),
            Some("23503") => DatabaseError::ForeignKeyViolation(message),
            Some("23514") => DatabaseError::ConstraintViolation(message),
            Some(code) if code.starts_with("22") => DatabaseError::InvalidValue(message),
            _ => DatabaseError::QueryFailed(message),
        }
    }
}

/// Maps SQLx errors to specific variants using the PostgreSQL error code
impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        match &error {
            sqlx::Error::RowNotFound => DatabaseError::NotFound("Record not found".to_string()),
            sqlx::Error::PoolTimedOut => DatabaseError::PoolExhausted,
            sqlx::Error::PoolClosed | sqlx::Error::Io(_) | sqlx::Error::Tls(_) => {
                DatabaseError::ConnectionFailed(error.to_string())
            }
            sqlx::Error::Database(db_err) => {
                let message = db_err.message().to_string();
                DatabaseError::from_sqlstate(db_err.code().as_deref(), message)
            }
            _ => DatabaseError::QueryFailed(error.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DatabaseError {
    fn from(error: sqlx::migrate::MigrateError) -> Self {
        DatabaseError::MigrationFailed(error.to_string())
    }
}

/// Flattens database failures into the port error every adapter reports
impl From<DatabaseError> for PortError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::NotFound(message) => PortError::NotFound {
                entity_type: "Record".to_string(),
                id: message,
            },
            DatabaseError::DuplicateEntry(message)
            | DatabaseError::ForeignKeyViolation(message) => PortError::conflict(message),
            DatabaseError::ConstraintViolation(message) | DatabaseError::InvalidValue(message) => {
                PortError::validation(message)
            }
            other @ (DatabaseError::ConnectionFailed(_) | DatabaseError::PoolExhausted) => {
                PortError::Connection {
                    message: other.to_string(),
                    source: Some(Box::new(other)),
                }
            }
            other => PortError::Internal {
                message: other.to_string(),
                source: Some(Box::new(other)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_maps_to_conflict() {
        let port: PortError =
            DatabaseError::duplicate("Insurance policy", "policy_number", "P-1").into();
        assert!(port.is_conflict());
        assert!(port.to_string().contains("P-1"));
    }

    #[test]
    fn test_pool_exhaustion_is_transient() {
        let port: PortError = DatabaseError::PoolExhausted.into();
        assert!(port.is_transient());
    }

    #[test]
    fn test_row_not_found_classified() {
        let error = DatabaseError::from(sqlx::Error::RowNotFound);
        assert!(matches!(error, DatabaseError::NotFound(_)));
    }

    #[test]
    fn test_sqlstate_classification() {
        let classify = |code| DatabaseError::from_sqlstate(Some(code), "boom".to_string());

        assert!(matches!(classify("23505"), DatabaseError::DuplicateEntry(_)));
        assert!(matches!(classify("23503"), DatabaseError::ForeignKeyViolation(_)));
        assert!(matches!(classify("23514"), DatabaseError::ConstraintViolation(_)));
        assert!(matches!(classify("22001"), DatabaseError::InvalidValue(_)));
        assert!(matches!(classify("22003"), DatabaseError::InvalidValue(_)));
        assert!(matches!(classify("42P01"), DatabaseError::QueryFailed(_)));
        assert!(matches!(
            DatabaseError::from_sqlstate(None, "boom".to_string()),
            DatabaseError::QueryFailed(_)
        ));
    }

    #[test]
    fn test_unstorable_value_is_a_validation_error() {
        let error =
            DatabaseError::from_sqlstate(Some("22003"), "numeric field overflow".to_string());
        let port: PortError = error.into();
        assert!(matches!(port, PortError::Validation { .. }));
        assert!(port.to_string().contains("numeric field overflow"));
    }

    #[test]
    fn test_corrupt_row_is_internal() {
        let port: PortError = DatabaseError::CorruptRow("status 'LAPSED'".to_string()).into();
        assert!(matches!(port, PortError::Internal { .. }));
    }
}
