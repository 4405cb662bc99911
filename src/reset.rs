//! Transactional table reset.
//!
//! Clears the configured tables (by default `messages` then `users`) and the
//! `sqlite_sequence` autoincrement bookkeeping in one transaction, with
//! foreign-key enforcement switched off for the duration. Either every delete
//! commits or none does.

use rusqlite::Connection;
use serde::Serialize;
use std::path::Path;

use crate::db;
use crate::error::ResetError;

/// Which tables to clear, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetPlan {
    pub tables: Vec<String>,
    /// Also clear `sqlite_sequence`, restarting every autoincrement counter.
    pub clear_sequence: bool,
}

impl Default for ResetPlan {
    fn default() -> Self {
        Self {
            tables: vec!["messages".into(), "users".into()],
            clear_sequence: true,
        }
    }
}

/// Rows removed from a single table.
#[derive(Debug, Clone, Serialize)]
pub struct TableReset {
    pub table: String,
    pub rows_deleted: usize,
}

/// Outcome of a committed reset.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResetReport {
    pub tables: Vec<TableReset>,
    /// Number of `sqlite_sequence` rows removed (one per autoincrement table seen so far).
    pub sequence_entries_cleared: usize,
}

impl ResetReport {
    pub fn total_rows_deleted(&self) -> usize {
        self.tables.iter().map(|t| t.rows_deleted).sum()
    }
}

/// Reset `messages`, `users` and the autoincrement counters of the database at `path`.
pub fn reset(path: impl AsRef<Path>) -> Result<ResetReport, ResetError> {
    reset_tables(path, &ResetPlan::default())
}

/// Open the database at `path`, apply `plan`, and close the connection on
/// every exit path.
pub fn reset_tables(path: impl AsRef<Path>, plan: &ResetPlan) -> Result<ResetReport, ResetError> {
    let path = path.as_ref();
    let mut conn = db::open_existing(path)?;

    let result = reset_connection(&mut conn, plan);

    match conn.close() {
        Ok(()) => tracing::debug!(path = %path.display(), "database closed"),
        Err((_conn, e)) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to close database cleanly")
        }
    }

    result
}

/// Apply `plan` to an already open connection.
///
/// Table names are checked before anything is touched. On error the
/// transaction has been rolled back and foreign-key enforcement is back to
/// whatever it was on entry.
pub fn reset_connection(conn: &mut Connection, plan: &ResetPlan) -> Result<ResetReport, ResetError> {
    for table in &plan.tables {
        validate_table_name(table)?;
        if !db::table_exists(conn, table)? {
            return Err(ResetError::UnknownTable(table.clone()));
        }
    }

    let result = with_foreign_keys_disabled(conn, |conn| {
        let tx = conn.transaction()?;
        let mut report = ResetReport::default();

        for table in &plan.tables {
            let rows_deleted = tx.execute(&format!("DELETE FROM \"{table}\""), [])?;
            tracing::debug!(table = %table, rows_deleted, "table cleared");
            report.tables.push(TableReset {
                table: table.clone(),
                rows_deleted,
            });
        }

        if plan.clear_sequence {
            // Only created once some table uses AUTOINCREMENT.
            if db::table_exists(&tx, "sqlite_sequence")? {
                report.sequence_entries_cleared = tx.execute("DELETE FROM sqlite_sequence", [])?;
                tracing::debug!(
                    entries = report.sequence_entries_cleared,
                    "autoincrement counters cleared"
                );
            } else {
                tracing::debug!("no sqlite_sequence table, skipping counter reset");
            }
        }

        tx.commit()?;
        Ok(report)
    });

    match &result {
        Ok(report) => tracing::info!(
            tables = report.tables.len(),
            rows_deleted = report.total_rows_deleted(),
            sequence_entries = report.sequence_entries_cleared,
            "reset committed"
        ),
        Err(e) => tracing::warn!(error = %e, "reset failed, transaction rolled back"),
    }

    result
}

/// Run `f` with `PRAGMA foreign_keys` off, then put the setting back to what
/// it was before, whether or not `f` succeeded.
///
/// SQLite ignores this pragma inside a transaction, so `f` must open and
/// finish its own transaction.
pub fn with_foreign_keys_disabled<T>(
    conn: &mut Connection,
    f: impl FnOnce(&mut Connection) -> Result<T, ResetError>,
) -> Result<T, ResetError> {
    let was_enabled = db::foreign_keys_enabled(conn)?;
    conn.pragma_update(None, "foreign_keys", "OFF")?;
    tracing::debug!(was_enabled, "foreign key enforcement disabled");

    let result = f(conn);

    let restore = conn.pragma_update(None, "foreign_keys", if was_enabled { "ON" } else { "OFF" });
    match (result, restore) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(e)) => Err(e.into()),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(restore_err)) => {
            tracing::warn!(error = %restore_err, "failed to restore foreign key enforcement");
            Err(e)
        }
    }
}

/// Table names end up spliced into SQL, so only plain identifiers are accepted.
pub(crate) fn validate_table_name(name: &str) -> Result<(), ResetError> {
    let mut chars = name.chars();
    let valid = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(ResetError::InvalidTable(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;

    fn seed(conn: &Connection) {
        conn.execute_batch(
            "INSERT INTO users (email, phone, password) VALUES ('a@example.com', '111', 'h1');
             INSERT INTO users (email, phone, password) VALUES ('b@example.com', '222', 'h2');
             INSERT INTO messages (sender_id, receiver_id, content) VALUES (1, 2, 'hello');",
        )
        .unwrap();
    }

    #[test]
    fn validate_table_name_accepts_identifiers() {
        assert!(validate_table_name("messages").is_ok());
        assert!(validate_table_name("_tmp2").is_ok());
    }

    #[test]
    fn validate_table_name_rejects_injection() {
        for bad in ["", "1users", "users; DROP TABLE messages", "us\"ers", "user-s"] {
            assert!(
                matches!(validate_table_name(bad), Err(ResetError::InvalidTable(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn reset_connection_reports_deleted_rows() {
        let mut conn = open_memory_database().unwrap();
        seed(&conn);

        let report = reset_connection(&mut conn, &ResetPlan::default()).unwrap();

        assert_eq!(report.tables.len(), 2);
        assert_eq!(report.tables[0].table, "messages");
        assert_eq!(report.tables[0].rows_deleted, 1);
        assert_eq!(report.tables[1].table, "users");
        assert_eq!(report.tables[1].rows_deleted, 2);
        assert_eq!(report.sequence_entries_cleared, 2);
        assert_eq!(report.total_rows_deleted(), 3);
    }

    #[test]
    fn unknown_table_touches_nothing() {
        let mut conn = open_memory_database().unwrap();
        seed(&conn);

        let plan = ResetPlan {
            tables: vec!["messages".into(), "chats".into()],
            clear_sequence: true,
        };
        let err = reset_connection(&mut conn, &plan).unwrap_err();
        assert!(matches!(err, ResetError::UnknownTable(ref t) if t == "chats"));
        assert_eq!(db::count_rows(&conn, "messages").unwrap(), 1);
    }

    #[test]
    fn sequence_kept_when_not_requested() {
        let mut conn = open_memory_database().unwrap();
        seed(&conn);

        let plan = ResetPlan {
            tables: vec!["messages".into()],
            clear_sequence: false,
        };
        let report = reset_connection(&mut conn, &plan).unwrap();
        assert_eq!(report.sequence_entries_cleared, 0);
        assert_eq!(db::sequence_value(&conn, "messages").unwrap(), Some(1));
    }

    #[test]
    fn missing_sequence_table_is_skipped() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE notes (id INTEGER PRIMARY KEY, body TEXT);
             INSERT INTO notes (body) VALUES ('x');",
        )
        .unwrap();

        let plan = ResetPlan {
            tables: vec!["notes".into()],
            clear_sequence: true,
        };
        let report = reset_connection(&mut conn, &plan).unwrap();
        assert_eq!(report.tables[0].rows_deleted, 1);
        assert_eq!(report.sequence_entries_cleared, 0);
    }

    #[test]
    fn foreign_keys_restored_after_error_in_closure() {
        let mut conn = open_memory_database().unwrap();
        assert!(db::foreign_keys_enabled(&conn).unwrap());

        let result: Result<(), ResetError> = with_foreign_keys_disabled(&mut conn, |conn| {
            assert!(!db::foreign_keys_enabled(conn).unwrap());
            Err(ResetError::UnknownTable("boom".into()))
        });

        assert!(result.is_err());
        assert!(db::foreign_keys_enabled(&conn).unwrap());
    }

    #[test]
    fn foreign_keys_left_off_when_they_started_off() {
        let mut conn = open_memory_database().unwrap();
        conn.pragma_update(None, "foreign_keys", "OFF").unwrap();

        with_foreign_keys_disabled(&mut conn, |_| Ok(())).unwrap();

        assert!(!db::foreign_keys_enabled(&conn).unwrap());
    }
}
