//! show_history - print logged detection events, newest first

use anyhow::Result;
use clap::Parser;

use toy_monitor::history::DEFAULT_MIN_INTERVAL;
use toy_monitor::HistoryLog;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to the detection history store.
    #[arg(long, env = "TOYMON_HISTORY_PATH", default_value = "toy_history.csv")]
    history_path: String,
    /// Print at most this many events (newest first). 0 means all.
    #[arg(long, default_value_t = 0)]
    limit: usize,
    /// Emit JSON instead of a table.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let history = HistoryLog::open(&args.history_path, DEFAULT_MIN_INTERVAL)?;
    let mut events = history.read_all()?;

    // Newest first is a display concern; the store keeps insertion order.
    events.reverse();
    if args.limit > 0 {
        events.truncate(args.limit);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&events)?);
        return Ok(());
    }

    if events.is_empty() {
        println!("history is empty");
        return Ok(());
    }
    println!("{:<20} {:>10}  {}", "Timestamp", "TotalCount", "Details");
    for event in &events {
        let details = event
            .breakdown
            .iter()
            .map(|(label, count)| format!("{}: {}", label, count))
            .collect::<Vec<_>>()
            .join("; ");
        println!(
            "{:<20} {:>10}  {}",
            event.timestamp.format("%Y-%m-%d %H:%M:%S"),
            event.total_count,
            details
        );
    }
    Ok(())
}
