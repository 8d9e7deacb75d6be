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
//! # Pi-hole Exporter
//!
//! Polls one Pi-hole's statistics API on a fixed interval and serves the
//! values on `GET /metrics` for Prometheus to scrape.
//!
//! The binary loads its configuration, installs logging, then hands over to
//! [`run`] with [`wait_for_shutdown_signal`] as the stop condition.

pub mod cli;
pub mod exporter;
pub mod logging;
pub mod shutdown;

pub use cli::Cli;
pub use exporter::{run, Exporter, SHUTDOWN_DEADLINE};
pub use logging::log_config;
pub use shutdown::wait_for_shutdown_signal;
