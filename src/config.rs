//! Environment-driven settings for the generation pipeline.
//!
//! Every knob has a built-in default; unset or unparseable variables fall
//! back to it silently. CLI flags take precedence over anything read here.

use crate::error::BinarizeError;
use crate::models::ThresholdConfig;
use std::sync::OnceLock;
use std::time::Duration;

/// Default public image-generation endpoint
pub const DEFAULT_ENDPOINT: &str = "https://image.pollinations.ai";
/// Default generation model
pub const DEFAULT_MODEL: &str = "flux";
/// Default square output size in pixels
pub const DEFAULT_SIZE: u32 = 1024;
/// Default HTTP timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

fn parse_env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

fn parse_env_u32(name: &str, default: u32) -> u32 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(default)
}

fn parse_env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn parse_env_string(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env_threshold(name: &str) -> ThresholdConfig {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<i64>().ok())
        .and_then(|v| ThresholdConfig::new(v).ok())
        .unwrap_or_default()
}

static PARALLEL_MIN_ROWS: OnceLock<usize> = OnceLock::new();

/// Images with at least this many rows are binarized on the rayon pool
pub fn parallel_min_rows() -> usize {
    *PARALLEL_MIN_ROWS.get_or_init(|| parse_env_usize("COLORING_PARALLEL_MIN_ROWS", 512).max(1))
}

/// Settings for building requests against the image endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the generation endpoint, without trailing slash
    pub endpoint: String,
    /// Model name passed through to the endpoint
    pub model: String,
    /// Requested image width
    pub width: u32,
    /// Requested image height
    pub height: u32,
    /// Luminance cutoff for binarization
    pub threshold: ThresholdConfig,
    /// HTTP request timeout
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            threshold: ThresholdConfig::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Read `COLORING_*` variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            endpoint: parse_env_string("COLORING_ENDPOINT", DEFAULT_ENDPOINT)
                .trim_end_matches('/')
                .to_string(),
            model: parse_env_string("COLORING_MODEL", DEFAULT_MODEL),
            width: parse_env_u32("COLORING_WIDTH", DEFAULT_SIZE).max(1),
            height: parse_env_u32("COLORING_HEIGHT", DEFAULT_SIZE).max(1),
            threshold: parse_env_threshold("COLORING_THRESHOLD"),
            timeout: Duration::from_secs(parse_env_u64(
                "COLORING_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )),
        }
    }

    /// Apply command-line values on top of this config; `None` keeps the current value
    pub fn with_overrides(
        mut self,
        width: Option<u32>,
        height: Option<u32>,
        threshold: Option<i64>,
    ) -> Result<Self, BinarizeError> {
        if let Some(w) = width {
            self.width = w.max(1);
        }
        if let Some(h) = height {
            self.height = h.max(1);
        }
        if let Some(t) = threshold {
            self.threshold = ThresholdConfig::new(t)?;
        }
        Ok(self)
    }
}
