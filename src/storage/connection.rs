//! Raw connection factory

use std::path::{Path, PathBuf};
use rusqlite::Connection;
use crate::config::{self, ProjectsConfig};
use crate::{DbErrorKind, Error, Result};
use super::{dao, schema};

/// Opens a fresh SQLite connection per call.
///
/// Holds no connection itself: callers own what `get_connection` returns and
/// release it by dropping it.
#[derive(Debug, Clone)]
pub struct DbConnection {
    path: PathBuf,
}

impl DbConnection {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolve the database path from config, falling back to the default
    pub fn from_config(config: &ProjectsConfig) -> Self {
        let path = config
            .database
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(config::default_database_path);
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a connection with foreign keys enforced
    pub fn get_connection(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path)
            .map_err(|e| Error::db(DbErrorKind::Connection, e))?;
        conn.pragma_update(None, "foreign_keys", true)
            .map_err(|e| Error::db(DbErrorKind::Connection, e))?;
        tracing::trace!("Opened connection to {}", self.path.display());
        Ok(conn)
    }

    /// Create every table and index that does not exist yet
    pub fn initialize_schema(&self) -> Result<()> {
        let mut conn = self.get_connection()?;
        dao::in_transaction(&mut conn, "initialize_schema", |tx| {
            for stmt in schema::all_schema_statements() {
                tx.execute(stmt, [])?;
            }
            Ok(())
        })?;
        tracing::info!("Schema ready at {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_schema_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let db = DbConnection::new(dir.path().join("projects.db"));

        db.initialize_schema().unwrap();
        db.initialize_schema().unwrap();

        let conn = db.get_connection().unwrap();
        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN \
                 ('project', 'material', 'step', 'category', 'project_category')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 5);
    }

    #[test]
    fn test_foreign_keys_enforced() {
        let dir = tempfile::tempdir().unwrap();
        let db = DbConnection::new(dir.path().join("projects.db"));
        db.initialize_schema().unwrap();

        let conn = db.get_connection().unwrap();
        let result = conn.execute(
            "INSERT INTO material (project_id, material_name) VALUES (?1, ?2)",
            rusqlite::params![999, "Orphan"],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_unopenable_path_is_connection_error() {
        let dir = tempfile::tempdir().unwrap();
        let db = DbConnection::new(dir.path().join("missing").join("projects.db"));

        let err = db.get_connection().unwrap_err();
        assert_eq!(err.db_kind(), Some(DbErrorKind::Connection));
    }

    #[test]
    fn test_from_config_prefers_configured_path() {
        let config = ProjectsConfig {
            database: Some("custom.db".into()),
        };
        assert_eq!(DbConnection::from_config(&config).path(), Path::new("custom.db"));
    }
}
