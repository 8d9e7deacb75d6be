// Copyright (C) 2026  winnyboy5
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
use crate::error::{ConfigError, ConfigResult};
use crate::schema::Config;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: &[&str] = &["pretty", "compact", "json"];

/// Configuration validation trait
pub trait Validator {
    fn validate(&self) -> ConfigResult<()>;
}

impl Validator for Config {
    fn validate(&self) -> ConfigResult<()> {
        if self.log_name.is_empty() {
            return Err(ConfigError::MissingRequired("log_name".to_string()));
        }

        if let Some(level) = &self.log_level {
            if !LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
                return Err(ConfigError::invalid_value(
                    "log_level",
                    format!("must be one of: {}", LOG_LEVELS.join(", ")),
                ));
            }
        }

        if !LOG_FORMATS.contains(&self.log_format.to_lowercase().as_str()) {
            return Err(ConfigError::invalid_value(
                "log_format",
                format!("must be one of: {}", LOG_FORMATS.join(", ")),
            ));
        }

        if self.bind_address.is_empty() {
            return Err(ConfigError::MissingRequired("bind_address".to_string()));
        }

        if self.port == 0 {
            return Err(ConfigError::invalid_value(
                "port",
                "port must be between 1 and 65535, got 0",
            ));
        }

        if self.pihole_interval == 0 {
            return Err(ConfigError::invalid_value(
                "pihole_interval",
                "interval is in seconds and must be at least 1",
            ));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::invalid_value(
                "request_timeout",
                "timeout is in seconds and must be at least 1",
            ));
        }

        if self.pihole_host.trim().is_empty() {
            return Err(ConfigError::MissingRequired("pihole_host".to_string()));
        }

        if self.pihole_host.contains("://") {
            return Err(ConfigError::invalid_value(
                "pihole_host",
                "expected host or host:port without a scheme",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_log_level() {
        let config = Config {
            log_level: Some("loud".to_string()),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "log_level"
        ));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = Config {
            pihole_interval: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_host_with_scheme_rejected() {
        let config = Config {
            pihole_host: "http://pi.hole".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_host_rejected() {
        let config = Config {
            pihole_host: "  ".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingRequired(field)) if field == "pihole_host"
        ));
    }
}
