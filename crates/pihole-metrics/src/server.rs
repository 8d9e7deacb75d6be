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
//! HTTP server for Prometheus metrics endpoint
//!
//! Provides an Axum-based HTTP server that exposes a `/metrics` endpoint
//! in Prometheus text exposition format. Any other path gets the router's
//! default 404.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::error::{MetricsError, MetricsResult};
use crate::{types::MetricsConfig, MetricsRegistry};

/// Bound, not yet serving, metrics endpoint
///
/// Binding happens up front so an unavailable port fails startup before any
/// background work is spawned.
pub struct MetricsServer {
    registry: MetricsRegistry,
    listener: TcpListener,
    local_addr: SocketAddr,
}

impl MetricsServer {
    /// Bind the listener described by `config`
    pub async fn bind(registry: MetricsRegistry, config: &MetricsConfig) -> MetricsResult<Self> {
        let addr = config.socket_addr();

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| MetricsError::Bind {
                addr: addr.clone(),
                source,
            })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| MetricsError::Bind { addr, source })?;

        info!("Metrics server listening on {}", local_addr);

        Ok(Self {
            registry,
            listener,
            local_addr,
        })
    }

    /// Address actually bound (resolves port 0)
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Spawn the accept loop and return a handle for stopping it
    ///
    /// # Example
    /// ```ignore
    /// let server = MetricsServer::bind(registry, &MetricsConfig::with_port(9510)).await?;
    /// let running = server.serve();
    /// // ...
    /// running.stop(Duration::from_secs(1)).await?;
    /// ```
    pub fn serve(self) -> RunningServer {
        let MetricsServer {
            registry,
            listener,
            local_addr,
        } = self;
        let shutdown = CancellationToken::new();
        let signal = shutdown.clone();
        let app = router(registry);

        info!("Serving metrics on http://{}/metrics", local_addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    signal.cancelled().await;
                    info!("Metrics server received shutdown signal, draining");
                })
                .await
        });

        RunningServer {
            local_addr,
            shutdown,
            handle,
        }
    }
}

/// A serving metrics endpoint
pub struct RunningServer {
    local_addr: SocketAddr,
    shutdown: CancellationToken,
    handle: JoinHandle<io::Result<()>>,
}

impl RunningServer {
    /// Address the server is listening on
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop accepting, let in-flight requests finish, and force-close after `deadline`
    pub async fn stop(self, deadline: Duration) -> MetricsResult<()> {
        self.shutdown.cancel();
        let mut handle = self.handle;

        match tokio::time::timeout(deadline, &mut handle).await {
            Ok(Ok(Ok(()))) => {
                info!("Metrics server stopped");
                Ok(())
            }
            Ok(Ok(Err(e))) => {
                error!("Metrics server exited with error: {}", e);
                Err(MetricsError::Serve(e))
            }
            Ok(Err(join_error)) => {
                error!("Metrics server task failed: {}", join_error);
                Err(MetricsError::Serve(io::Error::other(join_error)))
            }
            Err(_) => {
                warn!("Metrics server still busy after {:?}, aborting", deadline);
                handle.abort();
                Err(MetricsError::ShutdownTimeout(deadline))
            }
        }
    }
}

/// Build the router; `/metrics` is the only route
pub fn router(registry: MetricsRegistry) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(registry)
}

/// Handler for `/metrics` endpoint
///
/// Returns all metrics in Prometheus text exposition format
async fn metrics_handler(State(registry): State<MetricsRegistry>) -> Response {
    debug!("Serving metrics");

    match registry.render() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, registry.content_type())],
            body,
        )
            .into_response(),
        Err(e) => {
            error!("Failed to encode metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
