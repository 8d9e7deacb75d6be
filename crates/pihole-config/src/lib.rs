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
//! Configuration loading for the Pi-hole exporter
//!
//! Reads the exporter's YAML file (TOML and JSON are accepted too), applies
//! `PIHOLE_EXPORTER_*` environment overrides and validates the result before
//! anything starts.
//!
//! # Example
//!
//! ```no_run
//! use pihole_config::ConfigLoader;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConfigLoader::new().load_with_overrides("config.yaml").await?;
//!
//!     println!("Polling {} every {:?}", config.pihole_host, config.poll_interval());
//!     println!("Serving metrics on {}", config.bind_addr());
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigFormat, ConfigLoader, ENV_PREFIX};
pub use schema::Config;
pub use validation::Validator;
