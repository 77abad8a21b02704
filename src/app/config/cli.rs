use super::serde_helpers::{
    load_env_enum, load_env_list, load_env_path_opt, load_env_string, load_env_string_opt,
    load_env_var,
};
use super::{ConfigError, LogFormat, LogLevel};
use crate::enricher::{BuilderConfig, DEFAULT_LOG_TYPES};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[command(author, version, about, long_about = None)]
#[serde(default)]
pub struct Config {
    /// Reporting host written to docker.docker_host (machine hostname if not provided)
    #[arg(long, env = "RASK_DOCKER_HOST")]
    pub docker_host: Option<String>,

    /// Value of the @type field
    #[arg(long, env = "RASK_LOGSTASH_TYPE", default_value = "docker")]
    pub logstash_type: String,

    /// Omit the @type field entirely
    #[arg(long, env = "RASK_SUPPRESS_TYPE")]
    pub suppress_type: bool,

    /// Comma-separated logtype values that are promoted from JSON payloads
    #[arg(
        long,
        env = "RASK_LOG_TYPES",
        value_delimiter = ',',
        default_value = "applog"
    )]
    pub log_types: Vec<String>,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", default_value = "text")]
    pub log_format: LogFormat,

    /// Extra `target=level` filter directives, comma-separated
    #[arg(long = "log-directive", env = "LOG_DIRECTIVES", value_delimiter = ',')]
    pub log_directives: Vec<String>,

    /// Configuration file path (optional)
    #[arg(long, env = "CONFIG_FILE")]
    #[serde(skip)]
    pub config_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            docker_host: None,
            logstash_type: "docker".to_string(),
            suppress_type: false,
            log_types: DEFAULT_LOG_TYPES.iter().map(|t| (*t).to_string()).collect(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Text,
            log_directives: Vec::new(),
            config_file: None,
        }
    }
}

impl Config {
    pub fn from_args<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut config = Config::try_parse_from(args)
            .map_err(|e| ConfigError::InvalidConfig(e.to_string()))?;
        config.post_process()?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();

        load_env_string_opt("RASK_DOCKER_HOST", &mut config.docker_host);
        load_env_string("RASK_LOGSTASH_TYPE", &mut config.logstash_type);
        load_env_var("RASK_SUPPRESS_TYPE", &mut config.suppress_type)?;
        load_env_list("RASK_LOG_TYPES", &mut config.log_types);
        load_env_enum("LOG_LEVEL", &mut config.log_level)?;
        load_env_enum("LOG_FORMAT", &mut config.log_format)?;
        load_env_list("LOG_DIRECTIVES", &mut config.log_directives);
        load_env_path_opt("CONFIG_FILE", &mut config.config_file);

        config.post_process()?;
        config.validate()?;
        Ok(config)
    }

    /// CLI arguments (and their env fallbacks) layered over an optional config file.
    pub fn from_args_and_env<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut config = Config::try_parse_from(args)
            .map_err(|e| ConfigError::InvalidConfig(e.to_string()))?;

        if let Some(path) = config.config_file.clone() {
            let base = Self::read_file(&path)?;
            config = config.merge_over(base);
        }

        config.post_process()?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut config = Self::read_file(path.as_ref())?;
        config.post_process()?;
        config.validate()?;
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.config_file = Some(path.to_path_buf());
        Ok(config)
    }

    /// Keep every value of `self` that differs from the default; take the rest from `base`.
    fn merge_over(self, base: Config) -> Config {
        let defaults = Config::default();
        Config {
            docker_host: self.docker_host.or(base.docker_host),
            logstash_type: if self.logstash_type == defaults.logstash_type {
                base.logstash_type
            } else {
                self.logstash_type
            },
            suppress_type: self.suppress_type || base.suppress_type,
            log_types: if self.log_types == defaults.log_types {
                base.log_types
            } else {
                self.log_types
            },
            log_level: if self.log_level == defaults.log_level {
                base.log_level
            } else {
                self.log_level
            },
            log_format: if self.log_format == defaults.log_format {
                base.log_format
            } else {
                self.log_format
            },
            log_directives: if self.log_directives.is_empty() {
                base.log_directives
            } else {
                self.log_directives
            },
            config_file: self.config_file,
        }
    }

    pub fn post_process(&mut self) -> Result<(), ConfigError> {
        if let Some(host) = self.docker_host.as_mut() {
            *host = host.trim().to_string();
        }

        for log_type in &mut self.log_types {
            *log_type = log_type.trim().to_string();
        }
        // First occurrence wins, so the configured order survives.
        let mut seen = BTreeSet::new();
        self.log_types.retain(|log_type| seen.insert(log_type.clone()));

        for directive in &mut self.log_directives {
            *directive = directive.trim().to_string();
        }
        self.log_directives.retain(|directive| !directive.is_empty());

        Ok(())
    }

    /// Reporting host: the configured value, or the machine hostname.
    pub fn resolve_docker_host(&self) -> Result<String, ConfigError> {
        if let Some(host) = &self.docker_host {
            return Ok(host.clone());
        }

        let hostname = hostname::get().map_err(|e| ConfigError::HostnameError(e.to_string()))?;
        hostname
            .into_string()
            .map_err(|raw| ConfigError::HostnameError(format!("non UTF-8 hostname {raw:?}")))
    }

    pub fn builder_config(&self) -> Result<BuilderConfig, ConfigError> {
        let reporting_host = self.resolve_docker_host()?;
        Ok(BuilderConfig::new(reporting_host, self.logstash_type.clone())
            .with_suppress_type(self.suppress_type)
            .with_log_types(self.log_types.iter().cloned()))
    }
}
