use anyhow::{Context, Result};

use chat_reset::config::ResetConfig;
use chat_reset::stats::table_stats;

/// Display row counts and autoincrement counters in the terminal.
pub fn status(config: &ResetConfig, json: bool) -> Result<()> {
    let db_path = config.resolved_db_path();

    if !db_path.exists() {
        println!("Database: not found at {}", db_path.display());
        println!("Run `chat-reset init` to create it.");
        return Ok(());
    }

    let conn = chat_reset::db::open_existing(&db_path)?;
    let stats = table_stats(&conn, &config.reset.tables).context("failed to read table stats")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Database: {}", db_path.display());
    println!("{}", "=".repeat(40));
    for s in &stats {
        match s.rows {
            Some(rows) => {
                let seq = s
                    .sequence
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "-".into());
                println!("  {:<12} {:>8} rows   seq {}", s.table, rows, seq);
            }
            None => println!("  {:<12} (missing)", s.table),
        }
    }

    Ok(())
}
