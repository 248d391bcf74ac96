//! Error types for pgqb

use crate::qb::{Comparator, StatementKind};
use thiserror::Error;

/// Result type alias for pgqb operations
pub type QbResult<T> = Result<T, QbError>;

/// A statement that cannot be assembled.
///
/// These are detected before anything is sent to the database.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// No target table was set on the builder
    #[error("{0}: base table is not set")]
    MissingTable(StatementKind),

    /// SELECT without any target column
    #[error("SELECT: column list cannot be empty")]
    EmptyColumns,

    /// INSERT without any value
    #[error("INSERT: value list cannot be empty")]
    EmptyValues,

    /// UPDATE without any SET clause
    #[error("UPDATE: SET clause cannot be empty")]
    EmptySet,

    /// UPDATE/DELETE without WHERE under the default policy
    #[error("{0} without WHERE is not allowed; opt in with allow_unconditional()")]
    MissingWhere(StatementKind),

    /// `<` / `>` condition whose value is absent
    #[error("'{column} {}' needs a value", .comparator.as_sql())]
    MissingValue {
        column: String,
        comparator: Comparator,
    },

    /// Invalid SQL identifier (CTE name)
    #[error("invalid identifier: {0}")]
    InvalidIdent(String),

    /// Two CTEs with the same name in one WITH list
    #[error("duplicate CTE name: {0}")]
    DuplicateCte(String),
}

/// Error types for building and executing statements
#[derive(Debug, Error)]
pub enum QbError {
    /// Statement could not be assembled
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query execution error, as reported by the driver
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// Row not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Pool error
    #[cfg(feature = "pool")]
    #[error("Pool error: {0}")]
    Pool(String),
}

impl QbError {
    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Check if the statement failed before reaching the database
    pub fn is_build_error(&self) -> bool {
        matches!(self, Self::Build(_))
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// The underlying build error, if any.
    pub fn as_build_error(&self) -> Option<&BuildError> {
        match self {
            Self::Build(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(feature = "pool")]
impl From<deadpool_postgres::PoolError> for QbError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Pool(err.to_string())
    }
}
