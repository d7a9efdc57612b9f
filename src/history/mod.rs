//! Durable detection history.
//!
//! [`HistoryLog`] owns an append-only CSV table of detection events and is
//! the only writer. It is constructed once per process and holds nothing
//! but the backing-store path, the stream throttle state, and a clock.

pub mod store;
pub mod throttle;

use chrono::{DateTime, Local, NaiveDateTime};
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::clock::{Clock, SystemClock};
use throttle::Throttle;

/// Default minimum spacing between stream-sourced writes.
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_secs(3);

/// One logged record: when, how many, and the per-class breakdown.
///
/// Invariant: `total_count` equals the sum of the breakdown counts, labels
/// are unique within one event, and `total_count` is never zero (empty
/// frames are not logged).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DetectionEvent {
    pub timestamp: NaiveDateTime,
    pub total_count: u32,
    pub breakdown: Vec<(String, u32)>,
}

/// Where an aggregation request came from. Stream appends are throttled,
/// single-shot appends never are.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    SingleShot,
    Stream,
}

/// What `append` did. Skips are successes, not errors: nothing was written
/// and the store is unchanged.
#[derive(Clone, Debug, PartialEq)]
pub enum AppendOutcome {
    Logged(DetectionEvent),
    SkippedEmpty,
    Throttled,
}

/// Export target format. CSV is the spreadsheet-compatible format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
}

#[derive(Debug, Error)]
pub enum HistoryError {
    /// Backing store cannot be created, appended, or rewritten.
    #[error("history store I/O failure: {0}")]
    Storage(#[source] std::io::Error),
    /// Backing store exists but is not parseable as the expected table.
    /// Distinct from an empty history.
    #[error("history store is unreadable: {0}")]
    Unavailable(String),
    /// Export destination cannot be written.
    #[error("export destination I/O failure: {0}")]
    ExportIo(#[source] std::io::Error),
    /// Export requested with zero events.
    #[error("no events to export")]
    NoData,
    /// Breakdown carries a label the details encoding cannot represent.
    /// Rejected before anything is written.
    #[error("label {0:?} cannot be stored in the details field")]
    InvalidLabel(String),
}

pub struct HistoryLog {
    path: PathBuf,
    throttle: Throttle,
    clock: Box<dyn Clock>,
}

impl HistoryLog {
    /// Opens (creating if absent) the history at `path` with the system
    /// clock.
    pub fn open(path: impl Into<PathBuf>, min_interval: Duration) -> Result<Self, HistoryError> {
        Self::with_clock(path, min_interval, Box::new(SystemClock))
    }

    /// Opens the history with an injected clock. Tests use this with
    /// [`crate::ManualClock`] to drive throttle behavior.
    pub fn with_clock(
        path: impl Into<PathBuf>,
        min_interval: Duration,
        clock: Box<dyn Clock>,
    ) -> Result<Self, HistoryError> {
        let log = Self {
            path: path.into(),
            throttle: Throttle::new(min_interval),
            clock,
        };
        log.ensure_initialized()?;
        Ok(log)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the backing store with a header-only table when absent.
    /// Idempotent; an existing store is left untouched.
    pub fn ensure_initialized(&self) -> Result<(), HistoryError> {
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(mut file) => file
                .write_all(store::header_line().as_bytes())
                .map_err(HistoryError::Storage),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(HistoryError::Storage(e)),
        }
    }

    /// Appends one event built from `breakdown`, subject to the source
    /// policy: empty breakdowns are never written, stream appends only when
    /// strictly more than `min_interval` has passed since the last stream
    /// write.
    pub fn append(
        &mut self,
        breakdown: &[(String, u32)],
        source: Source,
    ) -> Result<AppendOutcome, HistoryError> {
        let total_count: u32 = breakdown.iter().map(|(_, n)| n).sum();
        if total_count == 0 {
            return Ok(AppendOutcome::SkippedEmpty);
        }
        validate_breakdown(breakdown)?;

        let now = self.clock.now();
        if source == Source::Stream && !self.throttle.allows(now) {
            return Ok(AppendOutcome::Throttled);
        }

        self.ensure_initialized()?;

        let event = DetectionEvent {
            timestamp: DateTime::<Local>::from(now).naive_local(),
            total_count,
            breakdown: breakdown.to_vec(),
        };
        let row = store::encode_row(&event);

        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(HistoryError::Storage)?;
        // One write of a pre-rendered row; a failed append leaves no
        // partial row behind.
        file.write_all(row.as_bytes())
            .map_err(HistoryError::Storage)?;

        if source == Source::Stream {
            self.throttle.mark(now);
        }
        Ok(AppendOutcome::Logged(event))
    }

    /// Parses the whole store. Absent store reads as an empty history;
    /// a present but malformed store is [`HistoryError::Unavailable`].
    pub fn read_all(&self) -> Result<Vec<DetectionEvent>, HistoryError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(HistoryError::Storage(e)),
        };
        store::parse_table(&raw).map_err(HistoryError::Unavailable)
    }

    /// Writes the full event sequence to `destination` in `read_all` order.
    /// Returns the number of exported events. Refuses to write an empty
    /// report.
    pub fn export(
        &self,
        destination: &Path,
        format: ExportFormat,
    ) -> Result<usize, HistoryError> {
        let events = self.read_all()?;
        if events.is_empty() {
            return Err(HistoryError::NoData);
        }

        let body = match format {
            ExportFormat::Csv => {
                let mut body = store::header_line();
                for event in &events {
                    body.push_str(&store::encode_row(event));
                }
                body
            }
        };
        fs::write(destination, body).map_err(HistoryError::ExportIo)?;
        Ok(events.len())
    }

    /// Truncates the store back to header-only. Destructive and immediate;
    /// any confirmation happens in the caller.
    pub fn clear(&self) -> Result<(), HistoryError> {
        fs::write(&self.path, store::header_line()).map_err(HistoryError::Storage)
    }

    /// Forgets the stream throttle state, as when the stream source is
    /// stopped and restarted.
    pub fn reset_throttle(&mut self) {
        self.throttle.reset();
    }
}

// A written row must parse back. The details entry separator is the exact
// "; " sequence and rows are newline-delimited, so labels containing either
// would make this log's own `read_all` fail; they are refused up front.
// Everything else (commas, quotes, lone `;` or `:`) survives the codec.
fn validate_breakdown(breakdown: &[(String, u32)]) -> Result<(), HistoryError> {
    for (label, _) in breakdown {
        if label.is_empty()
            || label.contains("; ")
            || label.contains('\n')
            || label.contains('\r')
        {
            return Err(HistoryError::InvalidLabel(label.clone()));
        }
    }
    Ok(())
}
