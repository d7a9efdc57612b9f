//! export_history - write the detection history to a spreadsheet-compatible file

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use toy_monitor::history::DEFAULT_MIN_INTERVAL;
use toy_monitor::{ExportFormat, HistoryLog};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to the detection history store.
    #[arg(long, env = "TOYMON_HISTORY_PATH", default_value = "toy_history.csv")]
    history_path: String,
    /// Output file path for the exported report.
    #[arg(long, default_value = "toy_history_export.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let history = HistoryLog::open(&args.history_path, DEFAULT_MIN_INTERVAL)?;
    let exported = history.export(&args.output, ExportFormat::Csv)?;
    println!("exported {} event(s) to {}", exported, args.output.display());
    Ok(())
}
