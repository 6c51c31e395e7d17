//! Error types for expression and statement construction.

use thiserror::Error;

/// Errors raised while building SQL fragments.
///
/// Rendering itself never fails: every structural problem is rejected by
/// the constructor that would otherwise produce an unrenderable tree.
#[derive(Debug, Error)]
pub enum SqlError {
    /// A list that SQLite requires to be non-empty was empty.
    #[error("{0} must contain at least one expression")]
    Empty(&'static str),

    /// A bound parameter token is not valid SQLite syntax.
    #[error("invalid bound parameter: {0}")]
    InvalidParameter(String),

    /// An explicit schema qualifier conflicts with the table's own schema.
    #[error("table '{table}' already belongs to schema '{current}', not '{requested}'")]
    SchemaMismatch {
        /// The table name.
        table: String,
        /// The schema the table reference already carries.
        current: String,
        /// The schema that was requested.
        requested: String,
    },

    /// Render settings could not be deserialized.
    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),
}

/// Result type alias for construction operations.
pub type Result<T> = std::result::Result<T, SqlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SqlError::Empty("IN list").to_string(),
            "IN list must contain at least one expression"
        );
        assert_eq!(
            SqlError::InvalidParameter(String::from(":")).to_string(),
            "invalid bound parameter: :"
        );
        let err = SqlError::SchemaMismatch {
            table: String::from("users"),
            current: String::from("main"),
            requested: String::from("temp"),
        };
        assert_eq!(
            err.to_string(),
            "table 'users' already belongs to schema 'main', not 'temp'"
        );
    }
}
