//! snapshot - run detection once and log the result as a single-shot event

use anyhow::{anyhow, Result};
use clap::Parser;

use toy_monitor::history::DEFAULT_MIN_INTERVAL;
use toy_monitor::{
    aggregate, AppendOutcome, Detection, DetectorBackend, FrameSource, HistoryLog, Source,
    StubBackend, StubSource,
};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to the detection history store.
    #[arg(long, env = "TOYMON_HISTORY_PATH", default_value = "toy_history.csv")]
    history_path: String,
    /// Frame source URL.
    #[arg(long, env = "TOYMON_SOURCE_URL", default_value = "stub://toy_camera")]
    source: String,
    /// Frame width.
    #[arg(long, default_value_t = 640)]
    width: u32,
    /// Frame height.
    #[arg(long, default_value_t = 480)]
    height: u32,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if !args.source.starts_with("stub://") {
        return Err(anyhow!("unsupported source url {}", args.source));
    }
    let mut source = StubSource::new(&args.source, args.width, args.height);
    let mut detector = StubBackend::with_script(vec![vec![
        Detection::labeled("car"),
        Detection::labeled("car"),
        Detection::labeled("robot"),
    ]]);

    let frame = source.next_frame()?;
    let detections = detector.detect(&frame)?;
    let counts = aggregate(&detections);

    let mut history = HistoryLog::open(&args.history_path, DEFAULT_MIN_INTERVAL)?;
    match history.append(&counts, Source::SingleShot)? {
        AppendOutcome::Logged(event) => {
            println!(
                "found {} object(s), logged to {}: {:?}",
                event.total_count, args.history_path, event.breakdown
            );
        }
        AppendOutcome::SkippedEmpty => {
            println!("no objects found, nothing logged");
        }
        // single-shot appends are never throttled
        AppendOutcome::Throttled => {
            return Err(anyhow!("unexpected throttle of a single-shot append"));
        }
    }
    Ok(())
}
