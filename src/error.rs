//! Error type for database operations performed by the reset.

use std::path::PathBuf;

/// A database operation failure.
///
/// Every way the reset can fail (opening the file, validating a table name,
/// executing a statement, committing) is a variant of this one type. When it
/// is returned from [`crate::reset_tables`], the transaction has already been rolled
/// back.
#[derive(Debug, thiserror::Error)]
pub enum ResetError {
    /// The database file could not be opened.
    #[error("failed to open database at {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// A configured table name is not a plain SQL identifier.
    #[error("invalid table name: {0:?}")]
    InvalidTable(String),

    /// A configured table does not exist in the database.
    #[error("no such table: {0}")]
    UnknownTable(String),

    /// Any statement, pragma or commit failure.
    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}
