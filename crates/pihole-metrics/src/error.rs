//! Errors raised by the metrics registry and HTTP endpoint

use std::io;
use std::time::Duration;
use thiserror::Error;

/// Metrics errors
#[derive(Error, Debug)]
pub enum MetricsError {
    /// A gauge could not be created or registered
    #[error("Failed to register metric: {0}")]
    Registry(#[from] prometheus::Error),

    /// Rendering the exposition text failed
    #[error("Failed to encode metrics: {0}")]
    Encode(String),

    /// The scrape port could not be bound
    #[error("Failed to bind metrics endpoint on {addr}: {source}")]
    Bind {
        /// Requested socket address
        addr: String,
        /// Underlying socket error
        #[source]
        source: io::Error,
    },

    /// The accept loop stopped with an error
    #[error("Metrics server error: {0}")]
    Serve(io::Error),

    /// In-flight requests were still running at the deadline; the server was aborted
    #[error("Metrics server did not drain within {0:?}, forcing close")]
    ShutdownTimeout(Duration),
}

/// Result alias for metrics operations
pub type MetricsResult<T> = Result<T, MetricsError>;
