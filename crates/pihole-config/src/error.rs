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
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating the exporter configuration.
///
/// All of them are fatal at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file exists but could not be read
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// `.toml` file with invalid syntax or field types
    #[error("Invalid TOML configuration: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// `.yaml` / `.yml` file with invalid syntax or field types
    #[error("Invalid YAML configuration: {0}")]
    YamlParseError(#[from] serde_yaml::Error),

    /// `.json` file with invalid syntax or field types
    #[error("Invalid JSON configuration: {0}")]
    JsonParseError(#[from] serde_json::Error),

    /// Extension other than yaml, yml, toml or json
    #[error("Unsupported configuration format '{0}', expected yaml, yml, toml or json")]
    UnsupportedFormat(String),

    /// No file at the given path
    #[error("Configuration file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Path without an extension to pick a format from
    #[error("Cannot tell configuration format of {}", .0.display())]
    InvalidPath(PathBuf),

    /// A `PIHOLE_EXPORTER_*` override that does not parse
    #[error("Invalid override {variable_name}={value}: {reason}")]
    EnvVarParsingError {
        /// Full variable name, prefix included
        variable_name: String,
        /// Raw value as found in the environment
        value: String,
        /// What was expected instead
        reason: String,
    },

    /// A value that parsed but is out of range
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue {
        /// Configuration key
        field: String,
        /// Accepted values or range
        reason: String,
    },

    /// A key that must not be empty
    #[error("Configuration field '{0}' must not be empty")]
    MissingRequired(String),
}

impl ConfigError {
    /// Override for `variable_name` could not be parsed
    pub fn env_var_parsing_error(
        variable_name: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ConfigError::EnvVarParsingError {
            variable_name: variable_name.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// `field` holds an out-of-range value
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result alias for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_field() {
        let error = ConfigError::invalid_value("pihole_interval", "must be at least 1");
        assert_eq!(
            error.to_string(),
            "Invalid value for 'pihole_interval': must be at least 1"
        );

        let error = ConfigError::env_var_parsing_error("PIHOLE_EXPORTER_PORT", "abc", "expected a number");
        assert_eq!(
            error.to_string(),
            "Invalid override PIHOLE_EXPORTER_PORT=abc: expected a number"
        );
    }
}
