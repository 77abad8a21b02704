use super::{Config, ConfigError};
use crate::app::logging_system::LogDirective;

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.suppress_type && self.logstash_type.is_empty() {
            return Err(ConfigError::InvalidConfig(
                "Logstash type must be set unless --suppress-type is given".to_string(),
            ));
        }

        if let Some(host) = &self.docker_host
            && host.trim().is_empty()
        {
            return Err(ConfigError::InvalidConfig(
                "Docker host must not be empty when set".to_string(),
            ));
        }

        if let Some(pos) = self.log_types.iter().position(|t| t.is_empty()) {
            return Err(ConfigError::InvalidConfig(format!(
                "Log type at position {pos} is empty"
            )));
        }

        for directive in &self.log_directives {
            LogDirective::parse(directive)
                .map_err(|e| ConfigError::InvalidConfig(e.to_string()))?;
        }

        Ok(())
    }
}
