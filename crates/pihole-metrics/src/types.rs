//! Common types for metrics collection

use serde::{Deserialize, Serialize};

/// Configuration for the metrics HTTP endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Port for metrics HTTP server
    pub port: u16,

    /// Bind address (default: 0.0.0.0)
    pub bind_address: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            port: 9510,
            bind_address: "0.0.0.0".to_string(),
        }
    }
}

impl MetricsConfig {
    /// Create new config listening on all interfaces
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Create new config from an address and port
    pub fn new(bind_address: impl Into<String>, port: u16) -> Self {
        Self {
            port,
            bind_address: bind_address.into(),
        }
    }

    /// Get bind address with port
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

/// Label carrying the Pi-hole identity on every series
pub const HOST_LABEL: &str = "host";

/// Every gauge the exporter publishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PiholeGauge {
    /// Domains on the blocklist
    DomainsBeingBlocked,
    /// DNS queries today
    DnsQueriesToday,
    /// Ads blocked today
    AdsBlockedToday,
    /// Percentage of queries blocked today
    AdsPercentageToday,
    /// Unique domains seen today
    UniqueDomains,
    /// Queries forwarded upstream
    QueriesForwarded,
    /// Queries answered from cache
    QueriesCached,
    /// Clients ever seen
    ClientsEverSeen,
    /// Unique clients today
    UniqueClients,
    /// Queries of all types
    DnsQueriesAllTypes,
    /// Replies by type
    Reply,
    /// 1 when blocking is enabled
    Status,
    /// Most queried domains
    TopQueries,
    /// Most blocked domains
    TopAds,
    /// Most active clients
    TopSources,
    /// Share of queries per upstream
    ForwardDestinations,
    /// Share of queries per record type
    QueryTypes,
}

impl PiholeGauge {
    /// All gauges, in registration order
    pub const ALL: [PiholeGauge; 17] = [
        PiholeGauge::DomainsBeingBlocked,
        PiholeGauge::DnsQueriesToday,
        PiholeGauge::AdsBlockedToday,
        PiholeGauge::AdsPercentageToday,
        PiholeGauge::UniqueDomains,
        PiholeGauge::QueriesForwarded,
        PiholeGauge::QueriesCached,
        PiholeGauge::ClientsEverSeen,
        PiholeGauge::UniqueClients,
        PiholeGauge::DnsQueriesAllTypes,
        PiholeGauge::Reply,
        PiholeGauge::Status,
        PiholeGauge::TopQueries,
        PiholeGauge::TopAds,
        PiholeGauge::TopSources,
        PiholeGauge::ForwardDestinations,
        PiholeGauge::QueryTypes,
    ];

    /// Prometheus metric name
    pub fn name(&self) -> &'static str {
        match self {
            PiholeGauge::DomainsBeingBlocked => "pihole_domains_being_blocked",
            PiholeGauge::DnsQueriesToday => "pihole_dns_queries_today",
            PiholeGauge::AdsBlockedToday => "pihole_ads_blocked_today",
            PiholeGauge::AdsPercentageToday => "pihole_ads_percentage_today",
            PiholeGauge::UniqueDomains => "pihole_unique_domains",
            PiholeGauge::QueriesForwarded => "pihole_queries_forwarded",
            PiholeGauge::QueriesCached => "pihole_queries_cached",
            PiholeGauge::ClientsEverSeen => "pihole_clients_ever_seen",
            PiholeGauge::UniqueClients => "pihole_unique_clients",
            PiholeGauge::DnsQueriesAllTypes => "pihole_dns_queries_all_types",
            PiholeGauge::Reply => "pihole_reply",
            PiholeGauge::Status => "pihole_status",
            PiholeGauge::TopQueries => "pihole_top_queries",
            PiholeGauge::TopAds => "pihole_top_ads",
            PiholeGauge::TopSources => "pihole_top_sources",
            PiholeGauge::ForwardDestinations => "pihole_forward_destinations",
            PiholeGauge::QueryTypes => "pihole_querytypes",
        }
    }

    /// Prometheus help text
    pub fn help(&self) -> &'static str {
        match self {
            PiholeGauge::DomainsBeingBlocked => {
                "Number of domains being blocked by Pi-hole"
            }
            PiholeGauge::DnsQueriesToday => {
                "Number of DNS queries made over the current day"
            }
            PiholeGauge::AdsBlockedToday => {
                "Number of ads blocked over the current day"
            }
            PiholeGauge::AdsPercentageToday => {
                "Percentage of ads blocked over the current day"
            }
            PiholeGauge::UniqueDomains => "Number of unique domains seen",
            PiholeGauge::QueriesForwarded => {
                "Number of DNS queries forwarded to an upstream server"
            }
            PiholeGauge::QueriesCached => {
                "Number of DNS queries answered from the cache"
            }
            PiholeGauge::ClientsEverSeen => "Number of clients ever seen",
            PiholeGauge::UniqueClients => "Number of unique clients seen",
            PiholeGauge::DnsQueriesAllTypes => {
                "Number of DNS queries of all types"
            }
            PiholeGauge::Reply => "Number of replies made for each type",
            PiholeGauge::Status => "Whether Pi-hole blocking is enabled (1) or disabled (0)",
            PiholeGauge::TopQueries => "Number of queries per domain",
            PiholeGauge::TopAds => "Number of blocked queries per domain",
            PiholeGauge::TopSources => "Number of queries per client",
            PiholeGauge::ForwardDestinations => {
                "Share of queries sent to each upstream destination"
            }
            PiholeGauge::QueryTypes => "Share of queries per record type",
        }
    }

    /// Label names, `host` first
    pub fn label_names(&self) -> &'static [&'static str] {
        match self {
            PiholeGauge::Reply | PiholeGauge::QueryTypes => &[HOST_LABEL, "type"],
            PiholeGauge::TopQueries | PiholeGauge::TopAds => &[HOST_LABEL, "domain"],
            PiholeGauge::TopSources => &[HOST_LABEL, "source"],
            PiholeGauge::ForwardDestinations => &[HOST_LABEL, "destination"],
            _ => &[HOST_LABEL],
        }
    }
}
