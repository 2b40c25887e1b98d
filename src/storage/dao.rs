//! Shared DAO plumbing: transaction scope, identity retrieval, decimal columns

use std::str::FromStr;
use rusqlite::{Connection, Row, Transaction};
use rusqlite::types::Type;
use rust_decimal::Decimal;
use crate::{DbErrorKind, Error, Result};

/// Run `f` inside one transaction on `conn`.
///
/// Commits when `f` returns `Ok`. On `Err` the transaction is rolled back
/// before the original error is returned; a failing rollback is only logged.
pub fn in_transaction<T, F>(conn: &mut Connection, op: &str, f: F) -> Result<T>
where
    F: FnOnce(&Transaction<'_>) -> Result<T>,
{
    let tx = conn
        .transaction()
        .map_err(|e| Error::db(DbErrorKind::Transaction, e))?;
    tracing::debug!(op, "Transaction open");

    match f(&tx) {
        Ok(value) => {
            tx.commit()
                .map_err(|e| Error::db(DbErrorKind::Transaction, e))?;
            tracing::debug!(op, "Transaction committed");
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback() {
                tracing::warn!(op, "Rollback failed: {}", rollback_err);
            }
            tracing::warn!(op, "Transaction rolled back: {}", err);
            Err(err)
        }
    }
}

/// Identity generated by the most recent insert on this connection
pub fn last_insert_id(conn: &Connection, table: &str) -> Result<i64> {
    let id: i64 = conn
        .query_row("SELECT last_insert_rowid()", [], |row| row.get(0))
        .map_err(|e| Error::db(DbErrorKind::Identity, e))?;

    if id <= 0 {
        return Err(Error::db(
            DbErrorKind::Identity,
            rusqlite::Error::QueryReturnedNoRows,
        ));
    }

    tracing::trace!(table, id, "Generated identity");
    Ok(id)
}

/// Bind form of a decimal column
pub fn decimal_to_sql(value: Option<Decimal>) -> Option<String> {
    value.map(|v| v.to_string())
}

/// Read a nullable decimal column stored as text
pub fn decimal_column(row: &Row, idx: usize) -> rusqlite::Result<Option<Decimal>> {
    let text: Option<String> = row.get(idx)?;
    text.map(|t| {
        Decimal::from_str(&t).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
        })
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE t (id INTEGER PRIMARY KEY, v TEXT)", []).unwrap();
        conn
    }

    fn count(conn: &Connection) -> i64 {
        conn.query_row("SELECT COUNT(*) FROM t", [], |row| row.get(0)).unwrap()
    }

    #[test]
    fn test_commit_on_ok() {
        let mut conn = scratch();
        let id = in_transaction(&mut conn, "insert", |tx| {
            tx.execute("INSERT INTO t (v) VALUES ('a')", [])?;
            last_insert_id(tx, "t")
        })
        .unwrap();

        assert_eq!(id, 1);
        assert_eq!(count(&conn), 1);
    }

    #[test]
    fn test_rollback_on_err_keeps_original_error() {
        let mut conn = scratch();
        let err = in_transaction(&mut conn, "insert", |tx| {
            tx.execute("INSERT INTO t (v) VALUES ('a')", [])?;
            tx.execute("INSERT INTO nowhere (v) VALUES ('b')", [])?;
            Ok(())
        })
        .unwrap_err();

        assert_eq!(err.db_kind(), Some(DbErrorKind::Statement));
        assert_eq!(count(&conn), 0);
    }

    #[test]
    fn test_identity_missing_without_insert() {
        let conn = scratch();
        let err = last_insert_id(&conn, "t").unwrap_err();
        assert_eq!(err.db_kind(), Some(DbErrorKind::Identity));
    }

    #[test]
    fn test_decimal_column_round_trip_keeps_scale() {
        let conn = scratch();
        let value = Decimal::from_str("40.50").unwrap();
        conn.execute("INSERT INTO t (v) VALUES (?1)", [decimal_to_sql(Some(value))])
            .unwrap();

        let read = conn
            .query_row("SELECT v FROM t", [], |row| decimal_column(row, 0))
            .unwrap();
        assert_eq!(read, Some(value));
        assert_eq!(read.unwrap().to_string(), "40.50");
    }

    #[test]
    fn test_decimal_column_rejects_garbage() {
        let conn = scratch();
        conn.execute("INSERT INTO t (v) VALUES ('lots')", []).unwrap();

        let result = conn.query_row("SELECT v FROM t", [], |row| decimal_column(row, 0));
        assert!(matches!(
            result,
            Err(rusqlite::Error::FromSqlConversionFailure(0, Type::Text, _))
        ));
    }
}
