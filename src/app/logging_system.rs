use super::config::{LogFormat, LogLevel};
use parking_lot::RwLock;
use std::sync::{Arc, OnceLock};
use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Invalid directive format '{input}'. Expected: 'target=level'")]
    InvalidDirectiveFormat { input: String },

    #[error("Invalid log level '{level}' in directive '{input}'")]
    InvalidLogLevel { input: String, level: String },

    #[error("Logging system initialization failed: {details}")]
    LoggingInitFailed { details: String },
}

/// A single `target=level` filter directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogDirective {
    pub target: String,
    pub level: LogLevel,
}

impl LogDirective {
    pub fn new(target: impl Into<String>, level: LogLevel) -> Self {
        Self {
            target: target.into(),
            level,
        }
    }

    pub fn parse(input: &str) -> Result<Self, LoggingError> {
        let Some((target, level)) = input.split_once('=') else {
            return Err(LoggingError::InvalidDirectiveFormat {
                input: input.to_string(),
            });
        };

        let target = target.trim();
        if target.is_empty() {
            return Err(LoggingError::InvalidDirectiveFormat {
                input: input.to_string(),
            });
        }

        let level = <LogLevel as clap::ValueEnum>::from_str(level.trim(), true).map_err(|_| {
            LoggingError::InvalidLogLevel {
                input: input.to_string(),
                level: level.to_string(),
            }
        })?;

        Ok(Self::new(target, level))
    }

    pub fn to_filter_string(&self) -> String {
        format!("{}={}", self.target, self.level.as_str())
    }
}

/// Collects filter directives and installs the global tracing subscriber.
///
/// Diagnostics always go to stderr: stdout carries the document stream.
pub struct LoggingSystem {
    directives: Arc<RwLock<Vec<LogDirective>>>,
}

impl LoggingSystem {
    pub fn new() -> Self {
        Self {
            directives: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn add_directive(&self, directive_str: &str) -> Result<(), LoggingError> {
        let directive = LogDirective::parse(directive_str)?;
        self.directives.write().push(directive);
        Ok(())
    }

    pub fn add_default_directives(&self) {
        let mut directives = self.directives.write();
        for target in ["tokio", "mio"] {
            directives.push(LogDirective::new(target, LogLevel::Warn));
        }
    }

    pub fn build_filter_string(&self, default_level: LogLevel) -> String {
        let directives = self.directives.read();

        let mut filter_parts = Vec::with_capacity(directives.len() + 1);
        filter_parts.push(default_level.as_str().to_string());
        filter_parts.extend(directives.iter().map(LogDirective::to_filter_string));

        filter_parts.join(",")
    }

    /// `RUST_LOG` wins over the configured level when it is set and valid.
    pub fn build_filter(&self, default_level: LogLevel) -> Result<EnvFilter, LoggingError> {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }

        let filter_string = self.build_filter_string(default_level);
        EnvFilter::try_new(&filter_string).map_err(|e| LoggingError::LoggingInitFailed {
            details: format!("Failed to create EnvFilter with '{filter_string}': {e}"),
        })
    }

    pub fn initialize_tracing(
        &self,
        default_level: LogLevel,
        format: LogFormat,
    ) -> Result<(), LoggingError> {
        let env_filter = self.build_filter(default_level)?;

        let result = match format {
            LogFormat::Text => tracing::subscriber::set_global_default(
                tracing_subscriber::registry().with(env_filter).with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true)
                        .compact(),
                ),
            ),
            LogFormat::Json => tracing::subscriber::set_global_default(
                tracing_subscriber::registry().with(env_filter).with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_ansi(false)
                        .json(),
                ),
            ),
        };

        result.map_err(|e| LoggingError::LoggingInitFailed {
            details: format!("Failed to set global tracing subscriber: {e}"),
        })
    }

    pub fn directive_count(&self) -> usize {
        self.directives.read().len()
    }
}

impl Default for LoggingSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Initialize logging once per process. Later calls return the first outcome.
///
/// `directives` are `target=level` filters applied after the defaults.
pub fn setup_logging_safe(
    level: LogLevel,
    format: LogFormat,
    directives: &[String],
) -> Result<(), LoggingError> {
    static INIT: OnceLock<Result<(), String>> = OnceLock::new();

    let outcome = INIT.get_or_init(|| {
        let logging_system = LoggingSystem::new();
        logging_system.add_default_directives();
        for directive in directives {
            logging_system
                .add_directive(directive)
                .map_err(|e| e.to_string())?;
        }
        logging_system
            .initialize_tracing(level, format)
            .map_err(|e| e.to_string())
    });

    outcome
        .clone()
        .map_err(|details| LoggingError::LoggingInitFailed { details })
}
