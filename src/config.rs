use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

const DEFAULT_HISTORY_PATH: &str = "toy_history.csv";
const DEFAULT_SOURCE_URL: &str = "stub://toy_camera";
const DEFAULT_SOURCE_WIDTH: u32 = 640;
const DEFAULT_SOURCE_HEIGHT: u32 = 480;
const DEFAULT_MIN_INTERVAL_SECS: f64 = 3.0;
const DEFAULT_POLL_INTERVAL_MS: u64 = 10;

#[derive(Debug, Deserialize, Default)]
struct MonitorConfigFile {
    history_path: Option<String>,
    source: Option<SourceConfigFile>,
    throttle: Option<ThrottleConfigFile>,
    poll: Option<PollConfigFile>,
}

#[derive(Debug, Deserialize, Default)]
struct SourceConfigFile {
    url: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
struct ThrottleConfigFile {
    min_interval_secs: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
struct PollConfigFile {
    interval_ms: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub history_path: String,
    pub source: SourceSettings,
    pub min_interval: Duration,
    pub poll_interval: Duration,
}

#[derive(Debug, Clone)]
pub struct SourceSettings {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

impl MonitorConfig {
    /// Loads configuration: JSON file named by `TOYMON_CONFIG` (optional),
    /// then `TOYMON_*` env overrides, then validation.
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("TOYMON_CONFIG").ok();
        let file_cfg = match config_path.as_deref() {
            Some(path) => Some(read_config_file(Path::new(path))?),
            None => None,
        };
        let mut cfg = Self::from_file(file_cfg.unwrap_or_default())?;
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_file(file: MonitorConfigFile) -> Result<Self> {
        let history_path = file
            .history_path
            .unwrap_or_else(|| DEFAULT_HISTORY_PATH.to_string());
        let source = SourceSettings {
            url: file
                .source
                .as_ref()
                .and_then(|source| source.url.clone())
                .unwrap_or_else(|| DEFAULT_SOURCE_URL.to_string()),
            width: file
                .source
                .as_ref()
                .and_then(|source| source.width)
                .unwrap_or(DEFAULT_SOURCE_WIDTH),
            height: file
                .source
                .and_then(|source| source.height)
                .unwrap_or(DEFAULT_SOURCE_HEIGHT),
        };
        let min_interval_secs = file
            .throttle
            .and_then(|throttle| throttle.min_interval_secs)
            .unwrap_or(DEFAULT_MIN_INTERVAL_SECS);
        if !min_interval_secs.is_finite() || min_interval_secs < 0.0 {
            return Err(anyhow!(
                "throttle min_interval_secs must be a non-negative number"
            ));
        }
        let min_interval = Duration::from_secs_f64(min_interval_secs);
        let poll_interval = Duration::from_millis(
            file.poll
                .and_then(|poll| poll.interval_ms)
                .unwrap_or(DEFAULT_POLL_INTERVAL_MS),
        );
        Ok(Self {
            history_path,
            source,
            min_interval,
            poll_interval,
        })
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(path) = std::env::var("TOYMON_HISTORY_PATH") {
            if !path.trim().is_empty() {
                self.history_path = path;
            }
        }
        if let Ok(url) = std::env::var("TOYMON_SOURCE_URL") {
            if !url.trim().is_empty() {
                self.source.url = url;
            }
        }
        if let Ok(secs) = std::env::var("TOYMON_MIN_INTERVAL_SECS") {
            let secs: f64 = secs
                .parse()
                .map_err(|_| anyhow!("TOYMON_MIN_INTERVAL_SECS must be a number of seconds"))?;
            if !secs.is_finite() || secs < 0.0 {
                return Err(anyhow!("TOYMON_MIN_INTERVAL_SECS must be non-negative"));
            }
            self.min_interval = Duration::from_secs_f64(secs);
        }
        if let Ok(ms) = std::env::var("TOYMON_POLL_INTERVAL_MS") {
            let ms: u64 = ms.parse().map_err(|_| {
                anyhow!("TOYMON_POLL_INTERVAL_MS must be an integer number of milliseconds")
            })?;
            self.poll_interval = Duration::from_millis(ms);
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.history_path.trim().is_empty() {
            return Err(anyhow!("history_path must not be empty"));
        }
        if self.min_interval.is_zero() {
            return Err(anyhow!("throttle min_interval must be greater than zero"));
        }
        if self.poll_interval.is_zero() {
            return Err(anyhow!("poll interval must be greater than zero"));
        }
        if self.source.width == 0 || self.source.height == 0 {
            return Err(anyhow!("source dimensions must be greater than zero"));
        }
        Ok(())
    }
}

fn read_config_file(path: &Path) -> Result<MonitorConfigFile> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let cfg = serde_json::from_str(&raw)
        .map_err(|e| anyhow!("invalid config file {}: {}", path.display(), e))?;
    Ok(cfg)
}
