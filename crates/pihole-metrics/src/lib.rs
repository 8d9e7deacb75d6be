//! Pi-hole Exporter Metrics Module
//!
//! Prometheus gauges for Pi-hole statistics and the HTTP endpoint that
//! serves them.
//!
//! # Features
//!
//! - **Prometheus Integration**: Standard gauges rendered in text exposition format
//! - **HTTP Endpoint**: Axum-based `/metrics` endpoint for scraping
//! - **Bounded Shutdown**: Graceful drain with a deadline, then forced close
//!
//! # Example
//!
//! ```ignore
//! use pihole_metrics::{MetricsConfig, MetricsRegistry, MetricsServer, PiholeGauge};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let registry = MetricsRegistry::new()?;
//!     registry.set(PiholeGauge::Status, &["pi.hole"], 1.0);
//!
//!     let server = MetricsServer::bind(registry.clone(), &MetricsConfig::with_port(9510)).await?;
//!     let running = server.serve();
//!
//!     tokio::signal::ctrl_c().await?;
//!     running.stop(Duration::from_secs(1)).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod registry;
pub mod server;
pub mod types;

pub use error::{MetricsError, MetricsResult};
pub use registry::MetricsRegistry;
pub use server::{MetricsServer, RunningServer};
pub use types::{MetricsConfig, PiholeGauge, HOST_LABEL};
