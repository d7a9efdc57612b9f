//! clear_history - irreversibly truncate the detection history
//!
//! The library `clear()` executes immediately; confirmation lives here, in
//! the caller.

use anyhow::{anyhow, Result};
use clap::Parser;
use std::io::{BufRead, Write};

use toy_monitor::history::DEFAULT_MIN_INTERVAL;
use toy_monitor::HistoryLog;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to the detection history store.
    #[arg(long, env = "TOYMON_HISTORY_PATH", default_value = "toy_history.csv")]
    history_path: String,
    /// Skip the interactive confirmation prompt.
    #[arg(long)]
    yes: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if !args.yes && !confirm(&args.history_path)? {
        println!("aborted, history unchanged");
        return Ok(());
    }

    let history = HistoryLog::open(&args.history_path, DEFAULT_MIN_INTERVAL)?;
    history.clear()?;
    println!("history cleared (header kept): {}", args.history_path);
    Ok(())
}

fn confirm(path: &str) -> Result<bool> {
    print!(
        "This will erase ALL logged events in {} and cannot be undone. Continue? [y/N] ",
        path
    );
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(|e| anyhow!("failed to read confirmation: {}", e))?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
