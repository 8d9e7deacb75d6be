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
//! Metrics registry holding the exporter's gauges

use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

use crate::error::{MetricsError, MetricsResult};
use crate::types::PiholeGauge;

/// Registry of every Pi-hole gauge
///
/// Thread-safe and cheap to clone; the poll loop writes through one clone while
/// the HTTP endpoint renders through another. Series are created on first
/// `set` for a label combination and never removed.
#[derive(Clone)]
pub struct MetricsRegistry {
    inner: Arc<MetricsRegistryInner>,
}

struct MetricsRegistryInner {
    /// Prometheus registry
    registry: Registry,
    /// One vector per gauge, keyed by kind
    gauges: HashMap<PiholeGauge, GaugeVec>,
}

impl MetricsRegistry {
    /// Create new metrics registry with every gauge registered
    pub fn new() -> MetricsResult<Self> {
        let registry = Registry::new();
        let mut gauges = HashMap::with_capacity(PiholeGauge::ALL.len());

        for gauge in PiholeGauge::ALL {
            let vec = GaugeVec::new(Opts::new(gauge.name(), gauge.help()), gauge.label_names())?;
            registry.register(Box::new(vec.clone()))?;
            gauges.insert(gauge, vec);
        }

        Ok(Self {
            inner: Arc::new(MetricsRegistryInner { registry, gauges }),
        })
    }

    /// Set one series, last write wins.
    ///
    /// `label_values` follow [`PiholeGauge::label_names`]. A wrong number of
    /// values is logged and the call is ignored.
    pub fn set(&self, gauge: PiholeGauge, label_values: &[&str], value: f64) {
        let Some(vec) = self.inner.gauges.get(&gauge) else {
            return;
        };

        match vec.get_metric_with_label_values(label_values) {
            Ok(series) => series.set(value),
            Err(e) => warn!(
                metric = gauge.name(),
                labels = ?label_values,
                "Ignoring gauge update: {}",
                e
            ),
        }
    }

    /// Render every series in the Prometheus text exposition format.
    ///
    /// Gauges that have never been set produce no output.
    pub fn render(&self) -> MetricsResult<String> {
        let metric_families = self.inner.registry.gather();
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();

        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|e| MetricsError::Encode(e.to_string()))?;

        String::from_utf8(buffer).map_err(|e| MetricsError::Encode(e.to_string()))
    }

    /// Content type of [`render`](Self::render) output
    pub fn content_type(&self) -> &'static str {
        prometheus::TEXT_FORMAT
    }
}
