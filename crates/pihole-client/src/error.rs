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
//! Error types for the stats client

use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while building a [`StatsClient`](crate::StatsClient)
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid Pi-hole host '{host}': {reason}")]
    InvalidHost { host: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

impl ClientError {
    /// Create an invalid host error
    pub fn invalid_host(host: impl Into<String>, reason: impl Into<String>) -> Self {
        ClientError::InvalidHost {
            host: host.into(),
            reason: reason.into(),
        }
    }
}

/// Errors from one fetch; each leaves published metrics untouched
#[derive(Error, Debug)]
pub enum FetchError {
    /// Connection, timeout or body transfer failure
    #[error("Request failed: {0}")]
    Network(#[source] reqwest::Error),

    /// Non-2xx response; the body is not decoded
    #[error("Unexpected HTTP status: {0}")]
    Status(StatusCode),

    /// Body is not JSON or does not match the stats shape
    #[error("Failed to decode stats: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// Wrap a transport error, stripping the request URL since it carries the token
    pub fn network(error: reqwest::Error) -> Self {
        FetchError::Network(error.without_url())
    }

    /// Short label for log fields
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Network(_) => "network",
            FetchError::Status(_) => "status",
            FetchError::Decode(_) => "decode",
        }
    }
}

/// Result type for fetches
pub type FetchResult<T> = Result<T, FetchError>;
