//! Transactional reset for the chat app's SQLite database.
//!
//! Clears `messages` and `users` and restarts every autoincrement counter by
//! emptying `sqlite_sequence`. The deletes run in one transaction with
//! foreign-key enforcement switched off. The database ends up either fully
//! reset or untouched.
//!
//! # Modules
//!
//! - [`config`]: configuration loading from TOML files and environment variables
//! - [`db`]: opening the database, chat schema, and table introspection helpers
//! - [`error`]: the [`ResetError`] type
//! - [`reset`]: the reset operation itself
//! - [`stats`]: row counts and sequence values for the `status` command

pub mod config;
pub mod db;
pub mod error;
pub mod reset;
pub mod stats;

pub use error::ResetError;
pub use reset::{reset, reset_tables, ResetPlan, ResetReport};
