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
//! Wiring of the poll loop and the metrics endpoint

use anyhow::{Context, Result};
use pihole_client::{Poller, StatsClient};
use pihole_config::Config;
use pihole_metrics::{MetricsConfig, MetricsRegistry, MetricsServer, RunningServer};
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{timeout_at, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Upper bound for the whole shutdown
pub const SHUTDOWN_DEADLINE: Duration = Duration::from_secs(1);

/// A running exporter: one poll loop and one metrics endpoint sharing a registry
pub struct Exporter {
    registry: MetricsRegistry,
    server: RunningServer,
    poller: JoinHandle<()>,
    cancel: CancellationToken,
}

impl Exporter {
    /// Start both activities.
    ///
    /// Fails before spawning anything if the Pi-hole host is invalid or the
    /// listen address cannot be bound.
    pub async fn start(config: &Config) -> Result<Self> {
        let registry = MetricsRegistry::new().context("Failed to create metrics registry")?;

        let client = StatsClient::new(
            config.pihole_host.as_str(),
            &config.pihole_token,
            config.request_timeout(),
            registry.clone(),
        )
        .context("Failed to create Pi-hole client")?;

        let metrics_config = MetricsConfig::new(config.bind_address.as_str(), config.port);
        let server = MetricsServer::bind(registry.clone(), &metrics_config)
            .await
            .context("Failed to start metrics endpoint")?;

        let cancel = CancellationToken::new();
        let poller = Poller::new(client, config.poll_interval()).spawn(cancel.child_token());
        let server = server.serve();

        info!(
            pihole_host = %config.pihole_host,
            listen = %server.local_addr(),
            interval_secs = config.pihole_interval,
            "Exporter started"
        );

        Ok(Self {
            registry,
            server,
            poller,
            cancel,
        })
    }

    /// Address the metrics endpoint is listening on
    pub fn local_addr(&self) -> SocketAddr {
        self.server.local_addr()
    }

    /// Registry shared by both activities
    pub fn registry(&self) -> &MetricsRegistry {
        &self.registry
    }

    /// Cancel the poll loop and stop the endpoint, both within one
    /// [`SHUTDOWN_DEADLINE`].
    ///
    /// The poll loop is joined with whatever time the endpoint left over.
    /// Overruns are logged; shutdown always completes.
    pub async fn shutdown(self) {
        let Exporter {
            server,
            mut poller,
            cancel,
            ..
        } = self;

        info!("Shutting down");
        let deadline = Instant::now() + SHUTDOWN_DEADLINE;
        cancel.cancel();

        if let Err(e) = server.stop(SHUTDOWN_DEADLINE).await {
            warn!("Metrics endpoint did not stop cleanly: {}", e);
        }

        // A finished task is still joined when the deadline has already passed
        match timeout_at(deadline, &mut poller).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!("Poll loop ended abnormally: {}", e),
            Err(_) => {
                warn!(
                    "Poll loop did not stop within {:?}, aborting",
                    SHUTDOWN_DEADLINE
                );
                poller.abort();
            }
        }

        info!("Shutdown complete");
    }
}

/// Run until `signal` resolves, then shut down.
///
/// A failing `signal` still shuts the exporter down, then its error is returned.
pub async fn run<F>(config: &Config, signal: F) -> Result<()>
where
    F: Future<Output = io::Result<()>>,
{
    let exporter = Exporter::start(config).await?;
    let result = signal.await;
    exporter.shutdown().await;
    result.context("Failed to listen for shutdown signals")
}
