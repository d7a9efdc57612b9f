//! Toy Detection Monitor
//!
//! This crate records what a pretrained object-detection model sees. The
//! model itself is opaque: it is consumed through the [`DetectorBackend`]
//! trait and never reimplemented here.
//!
//! # Architecture
//!
//! - `frame`: frame sources (stub source behind `stub://` URLs)
//! - `detect`: the detector seam and the per-frame label aggregator
//! - `history`: the durable detection history (append / read / export /
//!   clear) with stream-source throttling
//! - `stream`: the cooperative polling loop driving a continuous source
//! - `config`: daemon configuration (JSON file + env overrides)
//!
//! Control flow: a frame comes from a [`FrameSource`], the backend turns it
//! into labeled detections, [`aggregate`] reduces them to per-class counts,
//! and [`HistoryLog::append`] decides whether the event is persisted. Still
//! images always log when anything was found; stream frames are rate-limited
//! to one write per throttle interval.

pub mod clock;
pub mod config;
pub mod detect;
pub mod frame;
pub mod history;
pub mod stream;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::MonitorConfig;
pub use detect::{aggregate, Detection, DetectorBackend, StubBackend};
pub use frame::{Frame, FrameSource, StubSource};
pub use history::{
    AppendOutcome, DetectionEvent, ExportFormat, HistoryError, HistoryLog, Source,
};
pub use stream::{StreamRunner, StreamStats};
