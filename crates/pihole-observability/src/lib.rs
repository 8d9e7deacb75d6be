//! Pi-hole Exporter Observability Module
//!
//! Structured logging for the exporter, built on `tracing`.
//!
//! # Features
//!
//! - **Multiple Output Formats**: Pretty, compact, and JSON output
//! - **Environment-based Filtering**: Dynamic log level control via `RUST_LOG`
//! - **Rotated Log Files**: Optional hourly-rotated file written alongside the console
//!
//! # Example
//!
//! ```ignore
//! use pihole_observability::{init_tracing_with_config, LogConfig, LogFile, LogFormat};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let _guard = init_tracing_with_config(
//!         LogConfig::new()
//!             .with_format(LogFormat::Compact)
//!             .with_file(LogFile::new("./logs", "pihole_exporter.log")),
//!     )?;
//!     tracing::info!("Application started");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod initialization;

pub use config::{LogConfig, LogError, LogFile, LogFormat, LogOutput};
pub use initialization::{init_tracing_with_config, LogGuard};
