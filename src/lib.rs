//! # Projects - transactional data access for DIY projects
//!
//! Maps the relational project schema onto plain entity values:
//! - `project` rows with their owned `material` and `step` rows
//! - shared `category` rows linked through `project_category`
//! - recipe value types (`Ingredient`, `RecipeStep`, `Unit`) with display rendering
//!
//! Every store operation opens its own SQLite connection, runs inside one
//! transaction and either commits or rolls back before returning.

pub mod entity;
pub mod storage;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use entity::{Category, Ingredient, Material, Project, RecipeStep, Step, Unit};
pub use storage::{DbConnection, ProjectDao};

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Stage of a store operation at which a database failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbErrorKind {
    /// Opening or configuring the connection
    Connection,
    /// Beginning, committing or rolling back the transaction
    Transaction,
    /// Preparing or executing a statement, or extracting a row
    Statement,
    /// Reading back the generated identity of an insert
    Identity,
}

impl DbErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DbErrorKind::Connection => "connection",
            DbErrorKind::Transaction => "transaction",
            DbErrorKind::Statement => "statement",
            DbErrorKind::Identity => "identity",
        }
    }
}

impl std::fmt::Display for DbErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error types for store operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Database {kind} error: {source}")]
    Db {
        kind: DbErrorKind,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    pub fn db(kind: DbErrorKind, source: rusqlite::Error) -> Self {
        Error::Db { kind, source }
    }

    /// The database failure stage, if this is a database error
    pub fn db_kind(&self) -> Option<DbErrorKind> {
        match self {
            Error::Db { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// Statement-level failures are the default for anything raised with `?`
/// inside an open transaction.
impl From<rusqlite::Error> for Error {
    fn from(source: rusqlite::Error) -> Self {
        Error::db(DbErrorKind::Statement, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rusqlite_errors_become_statement_errors() {
        let err: Error = rusqlite::Error::QueryReturnedNoRows.into();
        assert_eq!(err.db_kind(), Some(DbErrorKind::Statement));
        assert!(err.to_string().starts_with("Database statement error"));
    }

    #[test]
    fn test_db_error_keeps_cause() {
        use std::error::Error as _;

        let err = Error::db(DbErrorKind::Identity, rusqlite::Error::QueryReturnedNoRows);
        assert!(err.source().is_some());
        assert_eq!(Error::InvalidInput("x".into()).db_kind(), None);
    }
}
