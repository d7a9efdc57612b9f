//! toymond - toy detection monitor daemon
//!
//! This daemon:
//! 1. Opens the detection history (creating it with a header when absent)
//! 2. Connects a frame source from the configured URL
//! 3. Polls the source, running the detector backend on each frame
//! 4. Appends aggregated counts as throttled stream events
//! 5. Stops cooperatively on Ctrl-C and reports run statistics

use anyhow::{anyhow, Result};
use std::sync::atomic::Ordering;

use toy_monitor::{
    Detection, HistoryLog, MonitorConfig, StreamRunner, StubBackend, StubSource,
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = MonitorConfig::load()?;
    let mut history = HistoryLog::open(&cfg.history_path, cfg.min_interval)?;

    if !cfg.source.url.starts_with("stub://") {
        return Err(anyhow!(
            "unsupported source url {} (only stub:// sources are built in; \
             real capture backends plug in through the FrameSource trait)",
            cfg.source.url
        ));
    }
    let source = StubSource::new(&cfg.source.url, cfg.source.width, cfg.source.height);
    // Synthetic detections so the pipeline can be exercised without a model.
    let detector = StubBackend::with_script(vec![
        vec![Detection::labeled("car"), Detection::labeled("robot")],
        vec![],
        vec![Detection::labeled("duck")],
        vec![],
    ]);

    let mut runner = StreamRunner::new(source, detector, cfg.poll_interval);
    let stop = runner.stop_flag();
    ctrlc::set_handler(move || {
        stop.store(true, Ordering::SeqCst);
    })?;

    log::info!("toymond running. writing to {}", cfg.history_path);
    log::info!(
        "source={} throttle_min_interval={:?} poll_interval={:?}",
        cfg.source.url,
        cfg.min_interval,
        cfg.poll_interval
    );

    let stats = runner.run(&mut history)?;
    println!(
        "stopped. frames={} events_logged={} throttled={}",
        stats.frames_processed, stats.events_logged, stats.appends_throttled
    );
    Ok(())
}
