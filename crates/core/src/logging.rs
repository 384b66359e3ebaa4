//! Logging for the portfolio terminal, built on the tracing ecosystem.
//!
//! # Environment Variables
//!
//! - `TERMFOLIO_LOG`: Filter directive (like `RUST_LOG`), e.g., `termfolio_core=debug`
//! - `TERMFOLIO_LOG_FORMAT`: Output format for stderr: `pretty`, `json`, `compact`
//! - `TERMFOLIO_LOG_DIR`: Directory for the rolling file log
//!
//! # Configuration
//!
//! ```toml
//! [logging]
//! level = "warn"
//! format = "compact"
//!
//! [logging.file]
//! enabled = false
//! level = "debug"
//! ```
//!
//! The interactive TUI owns the terminal, so it only ever installs the file
//! layer ([`LogTarget::File`]). One-shot commands log to stderr.

use crate::Error;
use crate::config::{FileLoggingConfig, LoggingConfig as ConfigLoggingConfig};
use std::env;
use std::io;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log output format for stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Pretty, human-readable output with colors
    Pretty,
    /// JSON output (one line per event)
    Json,
    /// Compact, single-line output
    #[default]
    Compact,
}

impl LogFormat {
    /// All available log formats.
    pub const VALUES: &[LogFormat] = &[LogFormat::Pretty, LogFormat::Json, LogFormat::Compact];

    /// Parse a log format from a string.
    pub fn parse_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pretty" => Some(LogFormat::Pretty),
            "json" => Some(LogFormat::Json),
            "compact" => Some(LogFormat::Compact),
            _ => None,
        }
    }

    /// Get the string representation of this format.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
            LogFormat::Compact => "compact",
        }
    }
}

/// Where log events go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Stderr, plus the file layer when enabled
    Stderr,
    /// File layer only (nothing is installed if file logging is disabled)
    File,
}

/// Logging configuration wrapper that bridges config and logging modules.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default log level for stderr output.
    pub level: String,
    /// Output format for stderr.
    pub format: LogFormat,
    /// File logging configuration (optional).
    pub file: Option<FileLoggingConfig>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "warn".to_string(), format: LogFormat::default(), file: None }
    }
}

impl From<ConfigLoggingConfig> for LoggingConfig {
    fn from(config: ConfigLoggingConfig) -> Self {
        let format = LogFormat::parse_str(&config.format).unwrap_or_default();

        Self { level: config.level, format, file: if config.file.enabled { Some(config.file) } else { None } }
    }
}

impl LoggingConfig {
    /// Create a new logging config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the log level.
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Set the output format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Enable file logging.
    pub fn with_file_logging(mut self, config: FileLoggingConfig) -> Self {
        self.file = Some(config);
        self
    }

    /// Build an EnvFilter from this config and environment variables.
    fn build_env_filter(&self, fallback: &str) -> EnvFilter {
        let filter = env::var("TERMFOLIO_LOG")
            .ok()
            .or_else(|| env::var("RUST_LOG").ok())
            .unwrap_or_else(|| fallback.to_string());

        EnvFilter::try_new(&filter).unwrap_or_else(|_| EnvFilter::new(fallback))
    }

    /// Detect if stderr is a TTY for pretty formatting.
    fn is_tty() -> bool {
        atty::is(atty::Stream::Stderr)
    }

    /// Determine the appropriate format for stderr output.
    fn detect_format(&self) -> LogFormat {
        if let Ok(fmt_str) = env::var("TERMFOLIO_LOG_FORMAT")
            && let Some(fmt) = LogFormat::parse_str(&fmt_str)
        {
            return fmt;
        }

        if self.format == LogFormat::Pretty && !Self::is_tty() { LogFormat::Compact } else { self.format }
    }

    /// Get the log directory path.
    pub fn log_dir() -> Result<PathBuf, Error> {
        if let Ok(custom_dir) = env::var("TERMFOLIO_LOG_DIR") {
            return Ok(PathBuf::from(custom_dir));
        }

        let home = dirs::home_dir().ok_or_else(|| Error::Logging("Could not determine home directory".to_string()))?;

        Ok(home.join(".termfolio").join("logs"))
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn stderr_layer(format: LogFormat) -> BoxedLayer {
    match format {
        LogFormat::Pretty => fmt::layer().pretty().with_writer(io::stderr).with_ansi(true).boxed(),
        LogFormat::Json => fmt::layer().json().with_writer(io::stderr).boxed(),
        LogFormat::Compact => fmt::layer().compact().with_writer(io::stderr).boxed(),
    }
}

/// Initialize the tracing subscriber with the given configuration.
///
/// Returns the appender guard when file logging is active; the caller must keep
/// it alive for buffered events to be flushed.
pub fn init_logging(config: Option<LoggingConfig>, target: LogTarget) -> Result<Option<WorkerGuard>, Error> {
    let config = config.unwrap_or_default();

    let (file_writer, guard) = match &config.file {
        Some(_) => {
            let log_dir = LoggingConfig::log_dir()?;
            std::fs::create_dir_all(&log_dir)
                .map_err(|e| Error::Logging(format!("Failed to create log directory: {}", e)))?;
            let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(&log_dir, "termfolio.log"));
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };

    let level = match target {
        LogTarget::File if file_writer.is_none() => return Ok(None),
        LogTarget::File => config.file.as_ref().map_or("debug", |f| f.level.as_str()),
        LogTarget::Stderr => config.level.as_str(),
    };

    let stderr = (target == LogTarget::Stderr).then(|| stderr_layer(config.detect_format()));
    let file = file_writer.map(|writer| fmt::layer().json().with_writer(writer));

    Registry::default()
        .with(stderr)
        .with(file)
        .with(config.build_env_filter(level))
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))?;

    Ok(guard)
}

/// Sanitize file paths for logging (replace the home directory with `~`).
pub fn sanitize_path(path: &std::path::Path) -> String {
    if let Some(home) = dirs::home_dir()
        && let Ok(stripped) = path.strip_prefix(&home)
    {
        return format!("~/{}", stripped.display());
    }

    path.display().to_string()
}
