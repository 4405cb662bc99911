//! SQL DDL for the chat app tables.
//!
//! Defines `users` and `messages`. Both use `AUTOINCREMENT`, so SQLite keeps
//! their counters in `sqlite_sequence`. All DDL uses `IF NOT EXISTS` so that
//! initialization is idempotent.

use rusqlite::Connection;

const SCHEMA_SQL: &str = r#"
-- Registered accounts
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT UNIQUE NOT NULL,
    phone TEXT UNIQUE NOT NULL,
    password TEXT NOT NULL, -- hashed
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP
);

-- Direct messages between two users
CREATE TABLE IF NOT EXISTS messages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    sender_id INTEGER NOT NULL,
    receiver_id INTEGER NOT NULL,
    content TEXT NOT NULL, -- encrypted
    timestamp DATETIME DEFAULT CURRENT_TIMESTAMP,
    is_read BOOLEAN DEFAULT 0,
    FOREIGN KEY (sender_id) REFERENCES users (id) ON DELETE CASCADE,
    FOREIGN KEY (receiver_id) REFERENCES users (id) ON DELETE CASCADE
);
"#;

/// Create the chat tables if they do not already exist.
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)
}
