//! Cooperative polling loop for continuous sources.
//!
//! One logical thread of control drives the whole pipeline: each step
//! captures a frame, runs detection, aggregates, and offers the counts to
//! the history log as a stream-sourced append. Stopping is cooperative via
//! a shared flag; no in-flight work needs interruption since each step is
//! synchronous and short.

use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::detect::{aggregate, DetectorBackend};
use crate::frame::FrameSource;
use crate::history::{AppendOutcome, HistoryLog, Source};

/// Default delay between poll-loop iterations.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreamStats {
    pub frames_processed: u64,
    pub events_logged: u64,
    pub appends_throttled: u64,
}

pub struct StreamRunner<S: FrameSource, D: DetectorBackend> {
    source: S,
    detector: D,
    poll_interval: Duration,
    stop: Arc<AtomicBool>,
    stats: StreamStats,
}

impl<S: FrameSource, D: DetectorBackend> StreamRunner<S, D> {
    pub fn new(source: S, detector: D, poll_interval: Duration) -> Self {
        Self {
            source,
            detector,
            poll_interval,
            stop: Arc::new(AtomicBool::new(false)),
            stats: StreamStats::default(),
        }
    }

    /// Shared stop flag; setting it halts `run` after the current step.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    pub fn stats(&self) -> StreamStats {
        self.stats
    }

    /// One poll-loop iteration: frame -> detect -> aggregate -> append.
    /// Errors from the source or the detector abort the step and are
    /// reported to the caller, never retried here.
    pub fn step(&mut self, history: &mut HistoryLog) -> Result<AppendOutcome> {
        let frame = self.source.next_frame()?;
        let detections = self.detector.detect(&frame)?;
        let counts = aggregate(&detections);

        let outcome = history.append(&counts, Source::Stream)?;
        self.stats.frames_processed += 1;
        match &outcome {
            AppendOutcome::Logged(event) => {
                self.stats.events_logged += 1;
                log::info!(
                    "stream event: total={} details={:?}",
                    event.total_count,
                    event.breakdown
                );
            }
            AppendOutcome::Throttled => {
                self.stats.appends_throttled += 1;
                log::debug!("stream append throttled");
            }
            AppendOutcome::SkippedEmpty => {}
        }
        Ok(outcome)
    }

    /// Runs until the stop flag is set. Starting a run resets the stream
    /// throttle, so a stopped-and-restarted stream may log immediately.
    pub fn run(&mut self, history: &mut HistoryLog) -> Result<StreamStats> {
        history.reset_throttle();
        log::info!(
            "stream loop started: source={} detector={}",
            self.source.name(),
            self.detector.name()
        );

        while !self.stop.load(Ordering::SeqCst) {
            self.step(history)?;
            if !self.poll_interval.is_zero() {
                std::thread::sleep(self.poll_interval);
            }
        }

        log::info!(
            "stream loop stopped: frames={} logged={} throttled={}",
            self.stats.frames_processed,
            self.stats.events_logged,
            self.stats.appends_throttled
        );
        Ok(self.stats)
    }
}
