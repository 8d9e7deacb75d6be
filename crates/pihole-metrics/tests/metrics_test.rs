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
//! Integration tests for pihole-metrics crate
//!
//! Tests the public API: registry creation, gauge updates, and the
//! Prometheus export format.

use pihole_metrics::{MetricsRegistry, PiholeGauge};
use pihole_test_utils::exposition::{sample, series_count};

#[test]
fn test_every_gauge_renders_once_set() {
    let registry = MetricsRegistry::new().unwrap();

    for gauge in PiholeGauge::ALL {
        let labels: Vec<&str> = gauge
            .label_names()
            .iter()
            .map(|name| if *name == "host" { "pi.hole" } else { "key" })
            .collect();
        registry.set(gauge, &labels, 1.0);
    }

    let text = registry.render().unwrap();
    for gauge in PiholeGauge::ALL {
        assert_eq!(series_count(&text, gauge.name()), 1, "{}", gauge.name());
        assert!(text.contains(&format!("# HELP {} ", gauge.name())));
    }
}

#[test]
fn test_label_values_are_escaped() {
    let registry = MetricsRegistry::new().unwrap();
    registry.set(
        PiholeGauge::TopSources,
        &["pi.hole", "laptop \"work\"|192.168.1.20"],
        9.0,
    );

    let text = registry.render().unwrap();
    assert!(text.contains(r#"source="laptop \"work\"|192.168.1.20""#));
    assert_eq!(
        sample(
            &text,
            "pihole_top_sources",
            &[("host", "pi.hole"), ("source", "laptop \"work\"|192.168.1.20")]
        ),
        Some(9.0)
    );
}

#[test]
fn test_registry_thread_safety() {
    use std::thread;

    let registry = MetricsRegistry::new().unwrap();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let reg = registry.clone();
            thread::spawn(move || {
                for j in 0..100 {
                    let domain = format!("domain-{}.example", j);
                    reg.set(PiholeGauge::TopQueries, &["pi.hole", domain.as_str()], f64::from(i));
                    let _ = reg.render().unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let text = registry.render().unwrap();
    assert_eq!(series_count(&text, "pihole_top_queries"), 100);
}
