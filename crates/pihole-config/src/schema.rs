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
//! Exporter configuration schema.
//!
//! Keys mirror the exporter's `config.yaml`:
//!
//! ```yaml
//! log_dir: ./logs
//! log_name: pihole_exporter.log
//! log_level: info
//! port: "9510"
//! pihole_interval: 10
//! pihole_host: 192.168.1.2
//! pihole_token: 0123abcd
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Top-level exporter configuration
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory for rotated log files
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    /// Log file name prefix
    #[serde(default = "default_log_name")]
    pub log_name: String,

    /// Log level (trace, debug, info, warn, error).
    /// When unset, `RUST_LOG` applies, then `info`.
    #[serde(default)]
    pub log_level: Option<String>,

    /// Log format (pretty, compact, json)
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Address the metrics endpoint binds to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Port the metrics endpoint listens on. Accepts an integer or a quoted string.
    #[serde(default = "default_port", deserialize_with = "deserialize_port")]
    pub port: u16,

    /// Polling interval, in seconds
    #[serde(default = "default_pihole_interval")]
    pub pihole_interval: u64,

    /// Pi-hole authority (`host` or `host:port`)
    #[serde(default = "default_pihole_host")]
    pub pihole_host: String,

    /// Pi-hole API token, forwarded verbatim as `auth`
    #[serde(default)]
    pub pihole_token: String,

    /// Timeout for one stats request, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("./logs")
}

fn default_log_name() -> String {
    "pihole_exporter.log".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9510
}

fn default_pihole_interval() -> u64 {
    10
}

fn default_pihole_host() -> String {
    "127.0.0.1".to_string()
}

fn default_request_timeout() -> u64 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            log_name: default_log_name(),
            log_level: None,
            log_format: default_log_format(),
            bind_address: default_bind_address(),
            port: default_port(),
            pihole_interval: default_pihole_interval(),
            pihole_host: default_pihole_host(),
            pihole_token: String::new(),
            request_timeout: default_request_timeout(),
        }
    }
}

impl Config {
    /// Socket address for the metrics endpoint
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// Time between two polls
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.pihole_interval)
    }

    /// Upper bound for one stats request
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.pihole_token.is_empty() {
            ""
        } else {
            "<redacted>"
        };

        f.debug_struct("Config")
            .field("log_dir", &self.log_dir)
            .field("log_name", &self.log_name)
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .field("bind_address", &self.bind_address)
            .field("port", &self.port)
            .field("pihole_interval", &self.pihole_interval)
            .field("pihole_host", &self.pihole_host)
            .field("pihole_token", &token)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PortRepr {
    Number(u16),
    Text(String),
}

fn deserialize_port<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    match PortRepr::deserialize(deserializer)? {
        PortRepr::Number(port) => Ok(port),
        PortRepr::Text(text) => text.trim().parse().map_err(|_| {
            serde::de::Error::custom(format!("invalid port '{}': expected 0-65535", text))
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 9510);
        assert_eq!(config.bind_addr(), "0.0.0.0:9510");
        assert_eq!(config.poll_interval(), Duration::from_secs(10));
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_log_level_optional() {
        assert_eq!(Config::default().log_level, None);

        let config: Config = serde_yaml::from_str("pihole_interval: 5").unwrap();
        assert_eq!(config.log_level, None);

        let config: Config = serde_yaml::from_str("log_level: debug").unwrap();
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_port_accepts_quoted_string() {
        let config: Config = serde_yaml::from_str("port: \"9617\"").unwrap();
        assert_eq!(config.port, 9617);

        let config: Config = serde_yaml::from_str("port: 9618").unwrap();
        assert_eq!(config.port, 9618);
    }

    #[test]
    fn test_port_rejects_garbage() {
        assert!(serde_yaml::from_str::<Config>("port: \"ninety\"").is_err());
        assert!(serde_yaml::from_str::<Config>("port: 70000").is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = Config {
            pihole_token: "supersecret".to_string(),
            ..Config::default()
        };

        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("supersecret"));
        assert!(rendered.contains("<redacted>"));
    }
}
