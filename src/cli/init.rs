use anyhow::Result;

use chat_reset::config::ResetConfig;

/// Create the database file and chat tables if they do not exist yet.
pub fn init(config: &ResetConfig) -> Result<()> {
    let db_path = config.resolved_db_path();
    chat_reset::db::open_or_create(&db_path)?;

    println!("Chat schema ready at {}", db_path.display());
    Ok(())
}
