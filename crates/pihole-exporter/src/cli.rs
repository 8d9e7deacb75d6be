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
//! Command-line arguments

use clap::Parser;
use std::path::PathBuf;

/// Exports Pi-hole statistics as Prometheus metrics
#[derive(Parser, Debug)]
#[command(name = "pihole-exporter")]
#[command(version, about = "Export Pi-hole statistics as Prometheus metrics")]
pub struct Cli {
    /// Configuration file (yaml, yml, toml or json)
    #[arg(short, long, value_name = "PATH", default_value = "config.yaml")]
    pub config: PathBuf,

    /// Override the configured log level or filter
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Validate the configuration and exit
    #[arg(long)]
    pub check: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["pihole-exporter"]);
        assert_eq!(cli.config, PathBuf::from("config.yaml"));
        assert!(cli.log_level.is_none());
        assert!(!cli.check);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from([
            "pihole-exporter",
            "-c",
            "/etc/pihole-exporter/config.toml",
            "--log-level",
            "debug",
            "--check",
        ]);
        assert_eq!(cli.config, PathBuf::from("/etc/pihole-exporter/config.toml"));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(cli.check);
    }
}
