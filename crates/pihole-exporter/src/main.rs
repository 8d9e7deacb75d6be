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

use anyhow::{Context, Result};
use clap::Parser;
use pihole_config::ConfigLoader;
use pihole_exporter::{log_config, run, wait_for_shutdown_signal, Cli};
use pihole_observability::init_tracing_with_config;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ConfigLoader::new()
        .load_with_overrides(&cli.config)
        .await
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    if cli.check {
        println!("Configuration OK: {:?}", config);
        return Ok(());
    }

    let _log_guard = init_tracing_with_config(log_config(&config, cli.log_level.as_deref())?)
        .context("Failed to initialize logging")?;

    info!("Setup log finished.");
    info!(version = env!("CARGO_PKG_VERSION"), "Starting pihole-exporter");

    run(&config, wait_for_shutdown_signal()).await
}
