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
//! Logging setup derived from the exporter configuration

use pihole_config::Config;
use pihole_observability::{LogConfig, LogError, LogFile, LogFormat};

/// Console plus hourly file logging as configured.
///
/// `level_override` (from `--log-level`) wins over `log_level`; with neither,
/// the level is left unset so `RUST_LOG` applies.
pub fn log_config(config: &Config, level_override: Option<&str>) -> Result<LogConfig, LogError> {
    let format: LogFormat = config.log_format.parse()?;
    let log_config = LogConfig::new()
        .with_format(format)
        .with_file(LogFile::new(config.log_dir.clone(), config.log_name.as_str()));

    Ok(match level_override.or(config.log_level.as_deref()) {
        Some(level) => log_config.with_level(level),
        None => log_config,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_unset_level_defers_to_environment() {
        let log_config = log_config(&Config::default(), None).unwrap();
        assert_eq!(log_config.level, None);
    }

    #[test]
    fn test_configured_level() {
        let config = Config {
            log_level: Some("warn".to_string()),
            ..Config::default()
        };
        assert_eq!(log_config(&config, None).unwrap().level.as_deref(), Some("warn"));
    }

    #[test]
    fn test_override_wins() {
        let config = Config {
            log_level: Some("warn".to_string()),
            ..Config::default()
        };
        let log_config = log_config(&config, Some("pihole_client=debug")).unwrap();
        assert_eq!(log_config.level.as_deref(), Some("pihole_client=debug"));
    }

    #[test]
    fn test_file_and_format() {
        let config = Config {
            log_dir: PathBuf::from("/var/log/pihole"),
            log_format: "json".to_string(),
            ..Config::default()
        };
        let log_config = log_config(&config, None).unwrap();

        assert_eq!(log_config.format, LogFormat::Json);
        assert_eq!(
            log_config.file,
            Some(LogFile::new("/var/log/pihole", "pihole_exporter.log"))
        );
    }

    #[test]
    fn test_bad_format_rejected() {
        let config = Config {
            log_format: "xml".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            log_config(&config, None),
            Err(LogError::InvalidFormat(_))
        ));
    }
}
