//! Centralized logging configuration for all Lincast binaries
//!
//! Provides consistent logging setup with support for:
//! - Text, JSON, and pretty-printed output
//! - Environment variable configuration
//! - A dev-mode switch: when it is off, no subscriber is installed and
//!   every tracing call in the library is a no-op
//!
//! # Examples
//!
//! ```no_run
//! use liblincast::logging::{LoggingConfig, LogFormat};
//!
//! // Initialize with JSON format, dev mode on
//! let config = LoggingConfig::new(LogFormat::Json, "info".to_string(), true);
//! config.init();
//!
//! // Or use default settings (respects env vars)
//! liblincast::logging::init_default();
//! ```

use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable text output (no colors, for piping)
    Text,
    /// Machine-parseable JSON (one JSON object per line)
    Json,
    /// Pretty-printed with colors (for development)
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            _ => Err(format!(
                "Invalid log format: '{}'. Valid options: text, json, pretty",
                s
            )),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
            LogFormat::Pretty => write!(f, "pretty"),
        }
    }
}

/// Configuration for logging initialization
pub struct LoggingConfig {
    pub format: LogFormat,
    pub level: String,
    /// When false, `init` installs nothing and all diagnostics are dropped
    pub dev_mode: bool,
}

impl LoggingConfig {
    /// Create a new logging configuration
    ///
    /// # Arguments
    ///
    /// * `format` - Log output format (text, json, or pretty)
    /// * `level` - Minimum log level (error, warn, info, debug, trace)
    /// * `dev_mode` - If false, no subscriber is installed
    pub fn new(format: LogFormat, level: String, dev_mode: bool) -> Self {
        Self {
            format,
            level,
            dev_mode,
        }
    }

    /// Initialize logging with the configured settings
    ///
    /// This should be called once at the start of your program. With dev
    /// mode off this is a no-op: tracing macros stay callable everywhere
    /// and discard their events, so the library never has to branch on
    /// whether logging is live.
    ///
    /// # Panics
    ///
    /// Panics if the logging subscriber has already been initialized
    pub fn init(&self) {
        use tracing_subscriber::EnvFilter;

        if !self.dev_mode {
            return;
        }

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format {
            LogFormat::Json => {
                // JSON output for machine parsing (production/monitoring)
                // Outputs one JSON object per line to stderr
                tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .with_current_span(true)
                    .with_span_list(true)
                    .flatten_event(true)
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .init();
            }
            LogFormat::Pretty => {
                // Pretty output with colors for development
                tracing_subscriber::fmt()
                    .pretty()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .init();
            }
            LogFormat::Text => {
                // Plain text output for piping/basic usage
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_level(true)
                    .init();
            }
        }
    }
}

/// Initialize logging with default settings
///
/// Respects `LINCAST_DEV_MODE`, `LINCAST_LOG_FORMAT` and
/// `LINCAST_LOG_LEVEL` environment variables. Dev mode defaults to off,
/// which leaves diagnostics disabled entirely.
///
/// # Examples
///
/// ```bash
/// export LINCAST_DEV_MODE=1
/// export LINCAST_LOG_FORMAT=json
/// export LINCAST_LOG_LEVEL=debug
/// lin-post "Hello world"
/// ```
pub fn init_default() {
    let dev_mode = std::env::var("LINCAST_DEV_MODE")
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "on"))
        .unwrap_or(false);

    let format = std::env::var("LINCAST_LOG_FORMAT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(LogFormat::Text);

    let level = std::env::var("LINCAST_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    LoggingConfig::new(format, level, dev_mode).init();
}
