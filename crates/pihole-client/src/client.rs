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
//! Stats client: fetches `api.php` and publishes the result as gauges

use pihole_metrics::{MetricsRegistry, PiholeGauge};
use reqwest::Url;
use std::fmt;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::error::{ClientError, FetchError, FetchResult};
use crate::snapshot::Snapshot;

/// Path of the legacy Pi-hole API
pub const API_PATH: &str = "/admin/api.php";

/// Sections requested on every fetch
pub const API_QUERY: &str = "summaryRaw&overTimeData&topItems&recentItems&getQueryTypes&getForwardDestinations&getQuerySources&jsonForceObject";

/// Fetches stats from one Pi-hole and writes them into a [`MetricsRegistry`].
///
/// The host and token are fixed at construction. Failed fetches never touch
/// the registry, so a scrape during an outage sees the last published values.
pub struct StatsClient {
    host: String,
    url: Url,
    http: reqwest::Client,
    registry: MetricsRegistry,
}

impl StatsClient {
    /// Create a client for `host` (`name` or `name:port`).
    ///
    /// `token` is appended verbatim as the `auth` parameter; `timeout` bounds
    /// a whole request including the body.
    pub fn new(
        host: impl Into<String>,
        token: &str,
        timeout: Duration,
        registry: MetricsRegistry,
    ) -> Result<Self, ClientError> {
        let host = host.into();
        let mut url = api_url(&host)?;
        url.set_query(Some(&format!("{}&auth={}", API_QUERY, token)));

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pihole-exporter/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            host,
            url,
            http,
            registry,
        })
    }

    /// Configured host, used as the `host` label
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Fetch and decode one snapshot
    #[instrument(skip(self), fields(host = %self.host))]
    pub async fn fetch(&self) -> FetchResult<Snapshot> {
        let response = self
            .http
            .get(self.url.clone())
            .send()
            .await
            .map_err(FetchError::network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await.map_err(FetchError::network)?;
        let snapshot = Snapshot::from_slice(&body)?;

        debug!(
            bytes = body.len(),
            entries = snapshot.mapping_entries(),
            "Decoded stats"
        );
        Ok(snapshot)
    }

    /// Write every field of `snapshot` into the registry.
    ///
    /// Series for mapping keys absent from `snapshot` keep their previous value.
    pub fn publish(&self, snapshot: &Snapshot) {
        let host = self.host.as_str();
        let registry = &self.registry;

        let scalars = [
            (PiholeGauge::DomainsBeingBlocked, snapshot.domains_being_blocked),
            (PiholeGauge::DnsQueriesToday, snapshot.dns_queries_today),
            (PiholeGauge::AdsBlockedToday, snapshot.ads_blocked_today),
            (PiholeGauge::UniqueDomains, snapshot.unique_domains),
            (PiholeGauge::QueriesForwarded, snapshot.queries_forwarded),
            (PiholeGauge::QueriesCached, snapshot.queries_cached),
            (PiholeGauge::ClientsEverSeen, snapshot.clients_ever_seen),
            (PiholeGauge::UniqueClients, snapshot.unique_clients),
            (PiholeGauge::DnsQueriesAllTypes, snapshot.dns_queries_all_types),
        ];
        for (gauge, value) in scalars {
            registry.set(gauge, &[host], value as f64);
        }
        registry.set(
            PiholeGauge::AdsPercentageToday,
            &[host],
            snapshot.ads_percentage_today,
        );

        let replies = [
            ("no_data", snapshot.reply_nodata),
            ("nx_domain", snapshot.reply_nxdomain),
            ("cname", snapshot.reply_cname),
            ("ip", snapshot.reply_ip),
        ];
        for (reply_type, value) in replies {
            registry.set(PiholeGauge::Reply, &[host, reply_type], value as f64);
        }

        let status = if snapshot.is_enabled() { 1.0 } else { 0.0 };
        registry.set(PiholeGauge::Status, &[host], status);

        for (domain, count) in &snapshot.top_queries {
            registry.set(PiholeGauge::TopQueries, &[host, domain.as_str()], *count as f64);
        }
        for (domain, count) in &snapshot.top_ads {
            registry.set(PiholeGauge::TopAds, &[host, domain.as_str()], *count as f64);
        }
        for (source, count) in &snapshot.top_sources {
            registry.set(PiholeGauge::TopSources, &[host, source.as_str()], *count as f64);
        }
        for (destination, share) in &snapshot.forward_destinations {
            registry.set(PiholeGauge::ForwardDestinations, &[host, destination.as_str()], *share);
        }
        for (query_type, share) in &snapshot.query_types {
            registry.set(PiholeGauge::QueryTypes, &[host, query_type.as_str()], *share);
        }
    }

    /// One fetch followed by a publish on success
    pub async fn refresh(&self) -> FetchResult<()> {
        let snapshot = self.fetch().await?;
        self.publish(&snapshot);
        Ok(())
    }
}

impl fmt::Debug for StatsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatsClient")
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}

/// Build the API URL for a bare `host[:port]` authority
fn api_url(host: &str) -> Result<Url, ClientError> {
    if host.trim().is_empty() {
        return Err(ClientError::invalid_host(host, "host is empty"));
    }
    if host.contains("://") {
        return Err(ClientError::invalid_host(
            host,
            "expected host[:port] without a scheme",
        ));
    }

    let url = Url::parse(&format!("http://{}{}", host, API_PATH))
        .map_err(|e| ClientError::invalid_host(host, e.to_string()))?;

    if url.path() != API_PATH || url.query().is_some() || url.fragment().is_some() {
        return Err(ClientError::invalid_host(
            host,
            "path, query and fragment are not allowed",
        ));
    }
    if !url.username().is_empty() || url.password().is_some() {
        return Err(ClientError::invalid_host(host, "userinfo is not allowed"));
    }

    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_accepts_authorities() {
        for host in ["pi.hole", "192.168.1.2", "192.168.1.2:8080", "[::1]:80", "localhost"] {
            let url = api_url(host).unwrap();
            assert_eq!(url.path(), API_PATH, "{}", host);
        }
    }

    #[test]
    fn test_api_url_rejects_non_authorities() {
        for host in [
            "",
            "   ",
            "http://pi.hole",
            "pi.hole/admin",
            "pi.hole?x=1",
            "pi.hole#top",
            "user:pass@pi.hole",
            "pi hole",
            "pi.hole:99999",
        ] {
            assert!(
                matches!(api_url(host), Err(ClientError::InvalidHost { .. })),
                "{:?} should be rejected",
                host
            );
        }
    }

    #[test]
    fn test_token_appended_verbatim() {
        let client = StatsClient::new(
            "pi.hole",
            "0123abcd",
            Duration::from_secs(5),
            MetricsRegistry::new().unwrap(),
        )
        .unwrap();

        assert_eq!(
            client.url.as_str(),
            format!("http://pi.hole/admin/api.php?{}&auth=0123abcd", API_QUERY)
        );
    }

    #[test]
    fn test_debug_hides_token() {
        let client = StatsClient::new(
            "pi.hole",
            "supersecret",
            Duration::from_secs(5),
            MetricsRegistry::new().unwrap(),
        )
        .unwrap();

        let rendered = format!("{:?}", client);
        assert!(rendered.contains("pi.hole"));
        assert!(!rendered.contains("supersecret"));
    }
}
