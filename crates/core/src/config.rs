use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::animator::Cadence;
use crate::content::Portfolio;
use crate::error::Result;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "TERMFOLIO_CONFIG";

/// Prompt identity, input limits and animation cadence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TerminalConfig {
    /// User shown in the prompt and by `whoami`
    #[serde(default = "default_user")]
    pub user: String,

    /// Host shown in the prompt and by `whoami`
    #[serde(default = "default_host")]
    pub host: String,

    /// Hard cap on the input line, in characters
    #[serde(default = "default_max_input_len")]
    pub max_input_len: usize,

    /// Delay before the first revealed unit
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Delay between revealed units
    #[serde(default)]
    pub typing_delay_ms: u64,

    /// Play the scripted welcome when a session starts
    #[serde(default = "default_true")]
    pub welcome: bool,
}

fn default_user() -> String {
    "daroh".to_string()
}

fn default_host() -> String {
    "terminal".to_string()
}

fn default_max_input_len() -> usize {
    1000
}

fn default_settle_delay_ms() -> u64 {
    50
}

fn default_true() -> bool {
    true
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            user: default_user(),
            host: default_host(),
            max_input_len: default_max_input_len(),
            settle_delay_ms: default_settle_delay_ms(),
            typing_delay_ms: 0,
            welcome: true,
        }
    }
}

impl TerminalConfig {
    /// `user@host`, as printed by `whoami` and the prompt
    pub fn identity(&self) -> String {
        format!("{}@{}", self.user, self.host)
    }

    /// Animation cadence derived from the configured delays
    pub fn cadence(&self) -> Cadence {
        Cadence {
            settle: Duration::from_millis(self.settle_delay_ms),
            per_unit: Duration::from_millis(self.typing_delay_ms),
        }
    }
}

/// Where portfolio content comes from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContentConfig {
    /// Optional TOML portfolio replacing the built-in one
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// File logging section (`[logging.file]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileLoggingConfig {
    /// Write a daily rolling JSON log
    #[serde(default)]
    pub enabled: bool,

    /// Level for the file layer
    #[serde(default = "default_file_level")]
    pub level: String,
}

fn default_file_level() -> String {
    "debug".to_string()
}

impl Default for FileLoggingConfig {
    fn default() -> Self {
        Self { enabled: false, level: default_file_level() }
    }
}

/// Logging section (`[logging]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter directive
    #[serde(default = "default_level")]
    pub level: String,

    /// `pretty`, `json` or `compact`
    #[serde(default = "default_format")]
    pub format: String,

    #[serde(default)]
    pub file: FileLoggingConfig,
}

fn default_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    "compact".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_level(), format: default_format(), file: FileLoggingConfig::default() }
    }
}

/// Root configuration structure for termfolio.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub terminal: TerminalConfig,

    #[serde(default)]
    pub content: ContentConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Resolve and load the active configuration
    ///
    /// An explicit path must exist. Without one, `$TERMFOLIO_CONFIG` and then the
    /// platform config directory are tried; a missing default file yields defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            tracing::debug!(path = %crate::logging::sanitize_path(path), "loading explicit config");
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => {
                tracing::debug!(path = %crate::logging::sanitize_path(&path), "loading config");
                Self::from_file(&path)
            }
            _ => {
                tracing::debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Default config location
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV)
            && !path.is_empty()
        {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("termfolio").join("termfolio.toml"))
    }

    /// Portfolio named by `[content]`, or the built-in one
    pub fn portfolio(&self) -> Result<Portfolio> {
        match &self.content.path {
            Some(path) => Ok(Portfolio::from_file(path)?),
            None => Ok(Portfolio::builtin()),
        }
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if self.terminal.max_input_len == 0 {
            return Err(ConfigError::InvalidValue("terminal.max_input_len must be at least 1".into()).into());
        }
        if self.terminal.user.trim().is_empty() {
            return Err(ConfigError::EmptyField("terminal.user").into());
        }
        if self.terminal.host.trim().is_empty() {
            return Err(ConfigError::EmptyField("terminal.host").into());
        }
        if crate::logging::LogFormat::parse_str(&self.logging.format).is_none() {
            return Err(ConfigError::InvalidValue(format!("unknown log format '{}'", self.logging.format)).into());
        }
        Ok(())
    }

    /// Get example configuration (as a string)
    pub fn example() -> &'static str {
        r#"# termfolio configuration
# Place at ~/.config/termfolio/termfolio.toml or pass --config PATH

[terminal]
# Prompt identity, also printed by `whoami`
user = "daroh"
host = "terminal"
# Input is truncated to this many characters
max_input_len = 1000
# Typewriter cadence: settle delay before the first unit, then per-unit delay
settle_delay_ms = 50
typing_delay_ms = 0
# Play the welcome script on start
welcome = true

[content]
# Replace the built-in portfolio with a TOML file (optional)
# path = "portfolio.toml"

[logging]
# Filter directive, overridden by TERMFOLIO_LOG or RUST_LOG
level = "warn"
# pretty, json or compact
format = "compact"

[logging.file]
# Daily rolling JSON log under ~/.termfolio/logs (or TERMFOLIO_LOG_DIR)
enabled = false
level = "debug"
"#
    }
}

/// Configuration-specific errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required string is blank
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// A value is out of range or unknown
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.terminal.user, "daroh");
        assert_eq!(config.terminal.host, "terminal");
        assert_eq!(config.terminal.max_input_len, 1000);
        assert_eq!(config.terminal.settle_delay_ms, 50);
        assert_eq!(config.terminal.typing_delay_ms, 0);
        assert!(config.terminal.welcome);
        assert!(config.content.path.is_none());
        assert_eq!(config.logging.level, "warn");
        assert!(!config.logging.file.enabled);
    }

    #[test]
    fn test_example_parses() {
        let config = Config::from_toml_str(Config::example()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config = Config::from_toml_str("[terminal]\nuser = \"ada\"\n").unwrap();
        assert_eq!(config.terminal.user, "ada");
        assert_eq!(config.terminal.host, "terminal");
        assert_eq!(config.terminal.identity(), "ada@terminal");
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = Config::from_toml_str("[terminal]\ncolour = \"green\"\n");
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_zero_input_len_rejected() {
        let err = Config::from_toml_str("[terminal]\nmax_input_len = 0\n").unwrap_err();
        assert!(err.to_string().contains("max_input_len"));
    }

    #[test]
    fn test_blank_user_rejected() {
        let err = Config::from_toml_str("[terminal]\nuser = \"  \"\n").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::EmptyField("terminal.user"))));
        assert!(err.to_string().contains("terminal.user must not be empty"));
    }

    #[test]
    fn test_unknown_log_format_rejected() {
        let err = Config::from_toml_str("[logging]\nformat = \"xml\"\n").unwrap_err();
        assert!(err.to_string().contains("unknown log format"));
    }

    #[test]
    fn test_cadence_from_terminal_config() {
        let config = Config::from_toml_str("[terminal]\nsettle_delay_ms = 10\ntyping_delay_ms = 3\n").unwrap();
        let cadence = config.terminal.cadence();
        assert_eq!(cadence.settle, Duration::from_millis(10));
        assert_eq!(cadence.per_unit, Duration::from_millis(3));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[terminal]\nhost = \"box\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.terminal.host, "box");
    }

    #[test]
    fn test_load_explicit_missing_file_errors() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(Config::load(Some(&missing)), Err(Error::Io(_))));
    }

    #[test]
    fn test_portfolio_defaults_to_builtin() {
        let portfolio = Config::default().portfolio().unwrap();
        assert_eq!(portfolio, Portfolio::builtin());
    }
}
