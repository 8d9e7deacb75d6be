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
//! Fixed-interval poll loop

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::client::StatsClient;
use crate::error::FetchResult;

// `tokio::time::interval` panics on a zero period
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Drives a [`StatsClient`] every `interval` until cancelled
#[derive(Debug)]
pub struct Poller {
    client: StatsClient,
    interval: Duration,
}

impl Poller {
    /// Create a poller. A zero `interval` is raised to one millisecond.
    pub fn new(client: StatsClient, interval: Duration) -> Self {
        Self {
            client,
            interval: interval.max(MIN_INTERVAL),
        }
    }

    /// One fetch, published on success
    pub async fn tick(&self) -> FetchResult<()> {
        self.client.refresh().await
    }

    /// Tick until `cancel` fires.
    ///
    /// The first tick runs immediately. A tick that overruns the interval
    /// skips the missed ones instead of bursting. Failures are logged and the
    /// loop carries on; an in-flight fetch is dropped on cancellation.
    pub async fn run(self, cancel: CancellationToken) {
        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            host = self.client.host(),
            interval_secs = self.interval.as_secs_f64(),
            "Starting poll loop"
        );

        let mut failures: u64 = 0;
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }

            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                result = self.tick() => result,
            };

            match result {
                Ok(()) => {
                    if failures > 0 {
                        info!(
                            host = self.client.host(),
                            failures, "Pi-hole reachable again"
                        );
                    }
                    failures = 0;
                    debug!(host = self.client.host(), "Published stats");
                }
                Err(e) => {
                    failures += 1;
                    warn!(
                        host = self.client.host(),
                        kind = e.kind(),
                        failures,
                        "Failed to fetch stats: {}",
                        e
                    );
                }
            }
        }

        info!(host = self.client.host(), "Poll loop stopped");
    }

    /// Run on a new task
    pub fn spawn(self, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(self.run(cancel))
    }
}
