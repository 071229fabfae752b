//! Logging configuration and initialization
//!
//! Structured logging with tracing: compact console output for development,
//! JSON for log aggregation, and an optional plain-text log file.

use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "CURVED_SCREEN_LOG";
/// Environment variable selecting the output format ("json" or anything else)
pub const LOG_FORMAT_ENV: &str = "CURVED_SCREEN_LOG_FORMAT";

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Enable console output (default: true)
    pub console_enabled: bool,
    /// Enable file logging (default: false)
    pub file_enabled: bool,
    /// Log file path (default: None, `curved-screen.log` in the working directory)
    pub file_path: Option<PathBuf>,
    /// Use JSON format for console logs (default: false)
    pub json_format: bool,
    /// Filter used when no environment filter is set (default: "info")
    pub default_level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            console_enabled: true,
            file_enabled: false,
            file_path: None,
            json_format: false,
            default_level: "info".to_string(),
        }
    }
}

impl LogConfig {
    /// Log file location, falling back to the working directory
    pub fn resolved_file_path(&self) -> PathBuf {
        self.file_path
            .clone()
            .unwrap_or_else(|| PathBuf::from("curved-screen.log"))
    }

    /// Enable file output at `path`
    pub fn with_log_file(mut self, path: PathBuf) -> Self {
        self.file_enabled = true;
        self.file_path = Some(path);
        self
    }
}

/// Whether a format value requests JSON output
fn is_json_format(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("json")
}

/// Initialize the global subscriber
///
/// Returns a guard that must outlive all logging when file output is enabled.
///
/// # Environment Variables
///
/// - `CURVED_SCREEN_LOG`: log filter (e.g. "debug", "info,curved_screen::scene=debug"),
///   falling back to `RUST_LOG`, then to `default_level`
/// - `CURVED_SCREEN_LOG_FORMAT`: set to "json" for JSON console output
pub fn init_logging(
    config: &LogConfig,
) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_env("RUST_LOG"))
        .unwrap_or_else(|_| EnvFilter::new(&config.default_level));

    let use_json = std::env::var(LOG_FORMAT_ENV)
        .map(|v| is_json_format(&v))
        .unwrap_or(config.json_format);

    let (file_layer, file_guard) = if config.file_enabled {
        let file = std::fs::File::create(config.resolved_file_path())?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        let layer = fmt::layer()
            .with_writer(non_blocking)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    // JSON for log aggregation, compact otherwise; an absent layer is a no-op
    let json_layer = (config.console_enabled && use_json).then(|| {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
    });
    let console_layer = (config.console_enabled && !use_json).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .compact()
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(json_layer)
        .with(console_layer)
        .try_init()?;

    tracing::info!(
        target: "curved_screen",
        version = env!("CARGO_PKG_VERSION"),
        json_format = use_json,
        file_enabled = config.file_enabled,
        "Logging initialized"
    );

    Ok(file_guard)
}

pub use tracing_appender::non_blocking::WorkerGuard as LogGuard;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_config_default() {
        let config = LogConfig::default();
        assert!(config.console_enabled);
        assert!(!config.file_enabled);
        assert!(!config.json_format);
        assert_eq!(config.default_level, "info");
        assert_eq!(config.resolved_file_path(), PathBuf::from("curved-screen.log"));
    }

    #[test]
    fn test_json_format_detection() {
        assert!(is_json_format("json"));
        assert!(is_json_format(" JSON "));
        assert!(!is_json_format("compact"));
        assert!(!is_json_format(""));
    }

    #[test]
    fn test_with_log_file() {
        let config = LogConfig::default().with_log_file(PathBuf::from("screen.log"));
        assert!(config.file_enabled);
        assert!(config.console_enabled);
        assert_eq!(config.resolved_file_path(), PathBuf::from("screen.log"));
    }

    // Installs the process-wide subscriber; no other test in this crate does
    #[test]
    fn test_init_logging_to_file() {
        let path = std::env::temp_dir().join(format!("curved-screen-log-{}.log", std::process::id()));
        let config = LogConfig {
            console_enabled: false,
            ..LogConfig::default().with_log_file(path.clone())
        };

        let guard = init_logging(&config).unwrap();
        assert!(guard.is_some());
        tracing::info!(target: "curved_screen", "file logging works");
        drop(guard);

        assert!(path.exists());
        let _ = std::fs::remove_file(&path);
    }
}
