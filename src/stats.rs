//! Row counts and autoincrement counters for the tables a reset would clear.

use rusqlite::Connection;
use serde::Serialize;

use crate::db;
use crate::error::ResetError;
use crate::reset::validate_table_name;

#[derive(Debug, Clone, Serialize)]
pub struct TableStats {
    pub table: String,
    /// `None` when the table does not exist.
    pub rows: Option<i64>,
    /// Last autoincrement value recorded in `sqlite_sequence`.
    pub sequence: Option<i64>,
}

/// Collect stats for each table, in the order given.
pub fn table_stats(conn: &Connection, tables: &[String]) -> Result<Vec<TableStats>, ResetError> {
    tables
        .iter()
        .map(|table| -> Result<TableStats, ResetError> {
            validate_table_name(table)?;
            if !db::table_exists(conn, table)? {
                return Ok(TableStats {
                    table: table.clone(),
                    rows: None,
                    sequence: None,
                });
            }
            Ok(TableStats {
                table: table.clone(),
                rows: Some(db::count_rows(conn, table)?),
                sequence: db::sequence_value(conn, table)?,
            })
        })
        .collect()
}
