use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_CONFIDENCE: f64 = 0.99;
pub const DEFAULT_TEXT_CONFIDENCE: f64 = 0.7;
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

/// Caller-mutable configuration of a [`crate::Screen`]
#[derive(Debug, Clone)]
pub struct ScreenConfig {
    /// Required match confidence for template images
    pub confidence: f64,
    /// Required confidence for OCR words
    pub text_confidence: f64,
    /// Directory relative template references are resolved against
    pub resource_directory: PathBuf,
    /// Highlight every successful `find`
    pub auto_highlight: bool,
    pub highlight_duration_ms: u64,
    pub highlight_opacity: f64,
    /// Default `wait_for` timeout
    pub wait_timeout_ms: u64,
    pub poll_interval_ms: u64,
}

impl ScreenConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            confidence: parse_var("DESKPILOT_CONFIDENCE").unwrap_or(defaults.confidence),
            text_confidence: parse_var("DESKPILOT_TEXT_CONFIDENCE")
                .unwrap_or(defaults.text_confidence),
            resource_directory: env::var("DESKPILOT_RESOURCE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.resource_directory),
            auto_highlight: parse_var("DESKPILOT_AUTO_HIGHLIGHT")
                .unwrap_or(defaults.auto_highlight),
            highlight_duration_ms: parse_var("DESKPILOT_HIGHLIGHT_DURATION_MS")
                .unwrap_or(defaults.highlight_duration_ms),
            highlight_opacity: parse_var("DESKPILOT_HIGHLIGHT_OPACITY")
                .unwrap_or(defaults.highlight_opacity),
            wait_timeout_ms: parse_var("DESKPILOT_WAIT_TIMEOUT_MS")
                .unwrap_or(defaults.wait_timeout_ms),
            poll_interval_ms: defaults.poll_interval_ms,
        }
    }

    pub fn highlight_duration(&self) -> Duration {
        Duration::from_millis(self.highlight_duration_ms)
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            confidence: DEFAULT_CONFIDENCE,
            text_confidence: DEFAULT_TEXT_CONFIDENCE,
            resource_directory: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            auto_highlight: false,
            highlight_duration_ms: 500,
            highlight_opacity: 0.25,
            wait_timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring unparseable {}={:?}", key, raw);
            None
        }
    }
}
