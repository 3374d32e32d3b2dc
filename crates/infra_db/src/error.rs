//! Database error types
//!
//! Every repository and schema operation reports a single [`DatabaseError`].
//! Driver errors are classified by PostgreSQL SQLSTATE code so callers can
//! branch on "not found" or "constraint violated" without string matching.

use core_kernel::CoreError;
use thiserror::Error;

/// Errors that can occur during database operations
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to establish a database connection
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A lookup matched no row
    #[error("Entity not found: {0}")]
    NotFound(String),

    /// Unique constraint violation
    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    /// Foreign key constraint violation
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Not-null or check constraint violation
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// A stored enum label is outside the closed set of its Rust type
    #[error("Invalid enum value: {0}")]
    InvalidEnumValue(String),

    /// Schema creation failed; the transaction was rolled back
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Input rejected before reaching the store
    #[error("Validation error: {0}")]
    Validation(String),

    /// Column decoding failed for a reason other than an enum label
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Pool exhaustion - no available connections
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Generic SQL error
    #[error("SQL error: {0}")]
    SqlError(sqlx::Error),
}

impl DatabaseError {
    /// Creates a not found error for a lookup key
    ///
    /// # Example
    ///
    /// ```rust
    /// use infra_db::DatabaseError;
    ///
    /// let error = DatabaseError::not_found("Asset", "symbol", "AMZN");
    /// assert_eq!(error.to_string(), "Entity not found: Asset with symbol 'AMZN' not found");
    /// ```
    pub fn not_found(entity: &str, field: &str, value: impl std::fmt::Display) -> Self {
        DatabaseError::NotFound(format!("{} with {} '{}' not found", entity, field, value))
    }

    /// Wraps the failure of a named schema step
    pub fn migration_failed(step: &str, cause: impl std::fmt::Display) -> Self {
        DatabaseError::MigrationFailed(format!("step '{}': {}", step, cause))
    }

    /// Checks if this error indicates a record was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, DatabaseError::NotFound(_))
    }

    /// Checks if this error is a constraint violation of any kind
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            DatabaseError::DuplicateEntry(_)
                | DatabaseError::ForeignKeyViolation(_)
                | DatabaseError::ConstraintViolation(_)
        )
    }

    /// Checks if this error is a connection-related issue
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            DatabaseError::ConnectionFailed(_) | DatabaseError::PoolExhausted
        )
    }
}

impl From<CoreError> for DatabaseError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::InvalidEnumValue { .. } => DatabaseError::InvalidEnumValue(error.to_string()),
            CoreError::NotFound(msg) => DatabaseError::NotFound(msg),
            CoreError::Validation(msg) | CoreError::Configuration(msg) => {
                DatabaseError::Validation(msg)
            }
        }
    }
}

/// Converts SQLx errors to more specific DatabaseError variants
///
/// Database errors are mapped by PostgreSQL error code; decode failures are
/// inspected for an enum-label rejection from `core_kernel`.
impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        match &error {
            sqlx::Error::RowNotFound => DatabaseError::NotFound("Record not found".to_string()),
            sqlx::Error::PoolTimedOut => DatabaseError::PoolExhausted,
            sqlx::Error::PoolClosed | sqlx::Error::Io(_) | sqlx::Error::Tls(_) => {
                DatabaseError::ConnectionFailed(error.to_string())
            }
            sqlx::Error::ColumnDecode { source, .. } | sqlx::Error::Decode(source) => {
                match source.downcast_ref::<CoreError>() {
                    Some(core @ CoreError::InvalidEnumValue { .. }) => {
                        DatabaseError::InvalidEnumValue(core.to_string())
                    }
                    _ => DatabaseError::SerializationError(error.to_string()),
                }
            }
            sqlx::Error::Database(db_err) => {
                // https://www.postgresql.org/docs/current/errcodes-appendix.html
                let message = db_err.message().to_string();
                match db_err.code().as_deref() {
                    Some("23505") => DatabaseError::DuplicateEntry(message),
                    Some("23503") => DatabaseError::ForeignKeyViolation(message),
                    Some("23502") | Some("23514") => DatabaseError::ConstraintViolation(message),
                    _ => DatabaseError::QueryFailed(message),
                }
            }
            _ => DatabaseError::SqlError(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_names_the_key() {
        let error = DatabaseError::not_found("Account", "name", "alice");
        assert!(error.is_not_found());
        assert!(error.to_string().contains("Account with name 'alice'"));
    }

    #[test]
    fn test_constraint_family() {
        assert!(DatabaseError::DuplicateEntry("x".into()).is_constraint_violation());
        assert!(DatabaseError::ForeignKeyViolation("x".into()).is_constraint_violation());
        assert!(DatabaseError::ConstraintViolation("x".into()).is_constraint_violation());
        assert!(!DatabaseError::NotFound("x".into()).is_constraint_violation());
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let error = DatabaseError::from(sqlx::Error::RowNotFound);
        assert!(error.is_not_found());
    }

    #[test]
    fn test_pool_errors_are_connection_errors() {
        assert!(DatabaseError::from(sqlx::Error::PoolTimedOut).is_connection_error());
        assert!(DatabaseError::from(sqlx::Error::PoolClosed).is_connection_error());
    }

    #[test]
    fn test_enum_decode_failure_maps_to_invalid_enum_value() {
        let source = CoreError::invalid_enum_value("record_type", "refund");
        let error = DatabaseError::from(sqlx::Error::ColumnDecode {
            index: "\"type\"".to_string(),
            source: Box::new(source),
        });
        match error {
            DatabaseError::InvalidEnumValue(msg) => assert!(msg.contains("refund")),
            other => panic!("Expected InvalidEnumValue, got {:?}", other),
        }
    }

    #[test]
    fn test_other_decode_failure_maps_to_serialization_error() {
        let error = DatabaseError::from(sqlx::Error::Decode("bad bytes".into()));
        assert!(matches!(error, DatabaseError::SerializationError(_)));
    }

    #[test]
    fn test_core_enum_error_converts() {
        let error: DatabaseError = CoreError::invalid_enum_value("granularity", "2min").into();
        assert!(matches!(error, DatabaseError::InvalidEnumValue(_)));
    }

    #[test]
    fn test_migration_failed_names_step() {
        let error = DatabaseError::migration_failed("create type granularity", "boom");
        assert_eq!(
            error.to_string(),
            "Migration failed: step 'create type granularity': boom"
        );
    }
}
