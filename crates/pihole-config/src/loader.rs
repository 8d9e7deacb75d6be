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
use crate::validation::Validator;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Prefix of every environment override
pub const ENV_PREFIX: &str = "PIHOLE_EXPORTER_";

/// Configuration format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            Some("toml") => Ok(ConfigFormat::Toml),
            Some("json") => Ok(ConfigFormat::Json),
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::InvalidPath(path.to_path_buf())),
        }
    }

    /// Get format name as string
    pub fn name(&self) -> &'static str {
        match self {
            ConfigFormat::Yaml => "YAML",
            ConfigFormat::Toml => "TOML",
            ConfigFormat::Json => "JSON",
        }
    }
}

/// Configuration loader
pub struct ConfigLoader {
    validate: bool,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        ConfigLoader { validate: true }
    }

    /// Create a loader without validation
    pub fn without_validation() -> Self {
        ConfigLoader { validate: false }
    }

    /// Load configuration from a file
    pub async fn load_file<P: AsRef<Path>>(&self, path: P) -> ConfigResult<Config> {
        let path = path.as_ref();
        debug!("Loading configuration from: {}", path.display());

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).await?;
        let format = ConfigFormat::from_path(path)?;

        info!(
            "Loaded {} configuration file: {}",
            format.name(),
            path.display()
        );

        self.load_from_string(&content, format)
    }

    /// Load configuration from a string
    pub fn load_from_string(&self, content: &str, format: ConfigFormat) -> ConfigResult<Config> {
        let config = self.parse(content, format)?;
        self.check(&config)?;
        Ok(config)
    }

    /// Load a file, apply `PIHOLE_EXPORTER_*` environment overrides, then validate
    pub async fn load_with_overrides<P: AsRef<Path>>(&self, path: P) -> ConfigResult<Config> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).await?;
        let mut config = self.parse(&content, ConfigFormat::from_path(path)?)?;
        self.apply_env_overrides(&mut config)?;
        self.check(&config)?;
        Ok(config)
    }

    fn parse(&self, content: &str, format: ConfigFormat) -> ConfigResult<Config> {
        let config: Config = match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Toml => toml::from_str(content)?,
            ConfigFormat::Json => serde_json::from_str(content)?,
        };

        debug!("Configuration parsed from {}", format.name());
        Ok(config)
    }

    fn check(&self, config: &Config) -> ConfigResult<()> {
        if self.validate {
            config.validate()?;
            info!("Configuration validated successfully");
        }
        Ok(())
    }

    /// Apply environment variable overrides from the process environment
    pub fn apply_env_overrides(&self, config: &mut Config) -> ConfigResult<()> {
        self.apply_overrides_from(config, |key| std::env::var(key).ok())
    }

    /// Apply overrides using `lookup` to resolve each `PIHOLE_EXPORTER_*` variable
    pub fn apply_overrides_from<F>(&self, config: &mut Config, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

        // Logging
        if let Some(value) = var("LOG_DIR") {
            config.log_dir = PathBuf::from(value);
        }
        if let Some(value) = var("LOG_LEVEL") {
            config.log_level = Some(value);
        }
        if let Some(value) = var("LOG_FORMAT") {
            config.log_format = value;
        }

        // Metrics endpoint
        if let Some(value) = var("BIND_ADDRESS") {
            config.bind_address = value;
        }
        if let Some(value) = var("PORT") {
            config.port = parse_number(&format!("{}PORT", ENV_PREFIX), &value)?;
        }

        // Pi-hole
        if let Some(value) = var("PIHOLE_HOST") {
            config.pihole_host = value;
        }
        if let Some(value) = var("PIHOLE_TOKEN") {
            config.pihole_token = value;
        }
        if let Some(value) = var("PIHOLE_INTERVAL") {
            config.pihole_interval =
                parse_number(&format!("{}PIHOLE_INTERVAL", ENV_PREFIX), &value)?;
        }
        if let Some(value) = var("REQUEST_TIMEOUT") {
            config.request_timeout =
                parse_number(&format!("{}REQUEST_TIMEOUT", ENV_PREFIX), &value)?;
        }

        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_number<T: std::str::FromStr>(variable: &str, value: &str) -> ConfigResult<T> {
    value.trim().parse().map_err(|_| {
        ConfigError::env_var_parsing_error(variable, value, "expected a non-negative integer")
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_format_detection() {
        assert_eq!(ConfigFormat::from_path("config.yaml").unwrap(), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path("config.yml").unwrap(), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path("config.toml").unwrap(), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path("config.json").unwrap(), ConfigFormat::Json);
    }

    #[test]
    fn test_format_detection_error() {
        assert!(matches!(
            ConfigFormat::from_path("config.ini"),
            Err(ConfigError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            ConfigFormat::from_path("config"),
            Err(ConfigError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_overrides_applied() {
        let env: HashMap<&str, &str> = [
            ("PIHOLE_EXPORTER_PIHOLE_HOST", "10.0.0.53"),
            ("PIHOLE_EXPORTER_PIHOLE_TOKEN", "abc123"),
            ("PIHOLE_EXPORTER_PORT", "9617"),
            ("PIHOLE_EXPORTER_PIHOLE_INTERVAL", "30"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        ConfigLoader::new()
            .apply_overrides_from(&mut config, |key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.pihole_host, "10.0.0.53");
        assert_eq!(config.pihole_token, "abc123");
        assert_eq!(config.port, 9617);
        assert_eq!(config.pihole_interval, 30);
        assert_eq!(config.log_level, None);
    }

    #[test]
    fn test_override_parse_error() {
        let mut config = Config::default();
        let result = ConfigLoader::new().apply_overrides_from(&mut config, |key| {
            (key == "PIHOLE_EXPORTER_PIHOLE_INTERVAL").then(|| "soon".to_string())
        });

        assert!(matches!(
            result,
            Err(ConfigError::EnvVarParsingError { variable_name, .. })
                if variable_name == "PIHOLE_EXPORTER_PIHOLE_INTERVAL"
        ));
    }
}
