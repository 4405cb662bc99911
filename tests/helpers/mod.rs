#![allow(dead_code)]

use chat_reset::db;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a file-backed chat database in a fresh temp dir. Keep the `TempDir`
/// alive for as long as the path is used.
pub fn test_db_file() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("chat_app.db");
    db::open_or_create(&path).unwrap();
    (tmp, path)
}

/// Insert `users` accounts and `messages` messages between the first two users.
pub fn seed(path: &Path, users: usize, messages: usize) {
    let conn = Connection::open(path).unwrap();
    conn.pragma_update(None, "foreign_keys", "ON").unwrap();
    for i in 0..users {
        conn.execute(
            "INSERT INTO users (email, phone, password) VALUES (?1, ?2, 'hashed')",
            rusqlite::params![format!("user{i}@example.com"), format!("555-{i:04}")],
        )
        .unwrap();
    }
    for i in 0..messages {
        conn.execute(
            "INSERT INTO messages (sender_id, receiver_id, content) VALUES (1, 2, ?1)",
            [format!("message {i}")],
        )
        .unwrap();
    }
}

pub fn count(path: &Path, table: &str) -> i64 {
    let conn = Connection::open(path).unwrap();
    db::count_rows(&conn, table).unwrap()
}

pub fn sequence(path: &Path, table: &str) -> Option<i64> {
    let conn = Connection::open(path).unwrap();
    db::sequence_value(&conn, table).unwrap()
}

/// Make any delete from `users` abort, so a reset fails after `messages` is cleared.
pub fn lock_users(path: &Path) {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(
        "CREATE TRIGGER users_locked BEFORE DELETE ON users
         BEGIN SELECT RAISE(ABORT, 'users are locked'); END;",
    )
    .unwrap();
}
