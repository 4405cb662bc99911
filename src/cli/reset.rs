//! CLI `reset` command — clear the chat tables after user confirmation.

use anyhow::{bail, Result};
use std::io::Write;

use chat_reset::config::ResetConfig;

/// Clear the configured tables after user confirmation.
///
/// Database failures are printed, not returned: by the time they surface the
/// transaction has been rolled back and there is nothing left for the caller
/// to do.
pub fn reset(config: &ResetConfig, yes: bool, json: bool) -> Result<()> {
    let db_path = config.resolved_db_path();
    let plan = config.plan();

    if !yes {
        println!(
            "WARNING: This will permanently delete all rows in: {}",
            plan.tables.join(", ")
        );
        if plan.clear_sequence {
            println!("Autoincrement counters will restart at 1.");
        }
        println!("Database: {}", db_path.display());
        print!("\nType YES to confirm: ");
        std::io::stdout().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if input.trim() != "YES" {
            bail!("reset cancelled");
        }
    }

    match chat_reset::reset_tables(&db_path, &plan) {
        Ok(report) if json => println!("{}", serde_json::to_string_pretty(&report)?),
        Ok(_) => println!("Tables reset successfully."),
        Err(e) => println!("An error occurred: {e}"),
    }

    Ok(())
}
