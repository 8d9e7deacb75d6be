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
//! # Pi-hole Stats Client
//!
//! Fetches the legacy `api.php` statistics document from one Pi-hole, decodes
//! it into a [`Snapshot`] and publishes every field as a Prometheus gauge
//! through [`pihole_metrics::MetricsRegistry`].
//!
//! ## Example
//!
//! ```ignore
//! use pihole_client::{Poller, StatsClient};
//! use pihole_metrics::MetricsRegistry;
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//!
//! let registry = MetricsRegistry::new()?;
//! let client = StatsClient::new("192.168.1.2", "token", Duration::from_secs(5), registry)?;
//!
//! let cancel = CancellationToken::new();
//! let handle = Poller::new(client, Duration::from_secs(10)).spawn(cancel.clone());
//! // ...
//! cancel.cancel();
//! handle.await?;
//! ```

pub mod client;
pub mod error;
pub mod poller;
pub mod snapshot;

pub use client::{StatsClient, API_PATH, API_QUERY};
pub use error::{ClientError, FetchError, FetchResult};
pub use poller::Poller;
pub use snapshot::{Snapshot, ENABLED_STATUS};
