//! Structured logging initialisation
//!
//! Installs one global `tracing` subscriber: an [`EnvFilter`] (`RUST_LOG` wins over
//! `FRONTMVC_LOG_LEVEL`), then a JSON or pretty `fmt` layer writing to stderr, directly or
//! through a `tracing-appender` background thread. Stdout stays free for command output.
//!
//! | variable                         | default |
//! |----------------------------------|---------|
//! | `FRONTMVC_LOG_LEVEL`             | `info`  |
//! | `FRONTMVC_LOG_FORMAT`            | `json`  |
//! | `FRONTMVC_LOG_ASYNC`             | `false` |
//! | `FRONTMVC_LOG_TARGET_FILTER`     | unset   |
//! | `FRONTMVC_LOG_INCLUDE_LOCATION`  | `false` |

use crate::config::parse_flag;
use anyhow::{Context, Result};
use std::env;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Output encoding of log records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl LogFormat {
    /// `pretty` (any case) selects [`LogFormat::Pretty`]; everything else is JSON.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("pretty") {
            LogFormat::Pretty
        } else {
            LogFormat::Json
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// trace/debug/info/warn/error; unknown values mean `info`
    pub log_level: String,
    pub format: LogFormat,
    /// Write through a background thread
    pub async_logging: bool,
    /// Extra comma-separated directives, e.g. `frontmvc::resolver=debug`
    pub target_filter: Option<String>,
    /// Add `file:line` to each record
    pub include_location: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            format: LogFormat::default(),
            async_logging: false,
            target_filter: None,
            include_location: false,
        }
    }
}

impl LogConfig {
    /// Read `FRONTMVC_LOG_*` variables over the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(level) = env::var("FRONTMVC_LOG_LEVEL") {
            config.log_level = level;
        }
        if let Ok(format) = env::var("FRONTMVC_LOG_FORMAT") {
            config.format = LogFormat::parse(&format);
        }
        if let Ok(flag) = env::var("FRONTMVC_LOG_ASYNC") {
            config.async_logging = parse_flag(&flag);
        }
        config.target_filter = env::var("FRONTMVC_LOG_TARGET_FILTER")
            .ok()
            .filter(|f| !f.trim().is_empty());
        if let Ok(flag) = env::var("FRONTMVC_LOG_INCLUDE_LOCATION") {
            config.include_location = parse_flag(&flag);
        }
        config
    }

    fn level(&self) -> Level {
        self.log_level.trim().parse().unwrap_or(Level::INFO)
    }

    /// The filter plus any target directives it could not parse.
    fn env_filter(&self) -> (EnvFilter, Vec<String>) {
        let mut filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level().as_str()));
        let mut rejected = Vec::new();

        let directives = self.target_filter.as_deref().unwrap_or_default();
        for directive in directives.split(',').map(str::trim).filter(|d| !d.is_empty()) {
            match directive.parse() {
                Ok(parsed) => filter = filter.add_directive(parsed),
                Err(_) => rejected.push(directive.to_string()),
            }
        }
        (filter, rejected)
    }
}

/// Initialise logging from `FRONTMVC_LOG_*`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging() -> Result<Option<WorkerGuard>> {
    init_logging_with_config(&LogConfig::from_env())
}

/// Initialise logging with an explicit configuration.
///
/// With `async_logging` the returned guard owns the writer thread; buffered records are
/// flushed when it is dropped, so keep it alive in `main`.
///
/// ```no_run
/// use frontmvc::logging::{init_logging_with_config, LogConfig, LogFormat};
///
/// let config = LogConfig {
///     format: LogFormat::Pretty,
///     ..LogConfig::default()
/// };
/// let _guard = init_logging_with_config(&config)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging_with_config(config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let (writer, guard) = if config.async_logging {
        let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stderr());
        (BoxMakeWriter::new(non_blocking), Some(guard))
    } else {
        (BoxMakeWriter::new(std::io::stderr), None)
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_file(config.include_location)
        .with_line_number(config.include_location)
        .with_writer(writer);
    let fmt_layer = match config.format {
        LogFormat::Json => fmt_layer.json().with_current_span(true).boxed(),
        LogFormat::Pretty => fmt_layer.pretty().boxed(),
    };

    let (filter, rejected) = config.env_filter();
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .context("failed to install the tracing subscriber")?;

    for directive in rejected {
        tracing::warn!(directive = %directive, "Ignoring invalid log filter directive");
    }
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse(" PRETTY "), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("whatever"), LogFormat::Json);
    }

    #[test]
    fn test_level_fallback() {
        let config = LogConfig {
            log_level: "loud".to_string(),
            ..LogConfig::default()
        };
        assert_eq!(config.level(), Level::INFO);
        let config = LogConfig {
            log_level: "DEBUG".to_string(),
            ..LogConfig::default()
        };
        assert_eq!(config.level(), Level::DEBUG);
    }

    #[test]
    fn test_invalid_directives_are_reported() {
        let config = LogConfig {
            target_filter: Some("frontmvc::router=debug, ,frontmvc=loudest,".to_string()),
            ..LogConfig::default()
        };
        let (_, rejected) = config.env_filter();
        assert_eq!(rejected, vec!["frontmvc=loudest".to_string()]);
    }
}
