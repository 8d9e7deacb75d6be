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
//! Sample Pi-hole `api.php` payloads.

/// A complete response as returned with `jsonForceObject`
pub const FULL_STATS: &str = r#"{
  "domains_being_blocked": 125038,
  "dns_queries_today": 31337,
  "ads_blocked_today": 4190,
  "ads_percentage_today": 13.370123,
  "unique_domains": 2981,
  "queries_forwarded": 17843,
  "queries_cached": 9304,
  "clients_ever_seen": 14,
  "unique_clients": 11,
  "dns_queries_all_types": 31337,
  "reply_NODATA": 412,
  "reply_NXDOMAIN": 977,
  "reply_CNAME": 6120,
  "reply_IP": 19050,
  "privacy_level": 0,
  "status": "enabled",
  "gravity_last_updated": { "file_exists": true, "absolute": 1700000000 },
  "domains_over_time": { "1700000000": 120, "1700000600": 98 },
  "ads_over_time": { "1700000000": 12, "1700000600": 7 },
  "top_queries": { "example.com": 42, "api.github.com": 17 },
  "top_ads": { "ads.example.net": 9 },
  "top_sources": { "laptop|192.168.1.20": 1200, "192.168.1.31": 310 },
  "forward_destinations": { "blocklist|blocklist": 13.37, "cache|cache": 29.65, "dns.google#53|8.8.8.8": 56.98 },
  "querytypes": { "A (IPv4)": 61.25, "AAAA (IPv6)": 30.5, "PTR": 8.25 }
}"#;

/// Minimal response with most fields omitted
pub const MINIMAL_STATS: &str =
    r#"{"domains_being_blocked": 10000, "status": "enabled", "top_queries": {"example.com": 42}}"#;

/// Build a minimal response with one top query
pub fn stats_with_top_query(domain: &str, count: u64) -> String {
    serde_json::json!({
        "domains_being_blocked": 10000,
        "status": "enabled",
        "top_queries": { domain: count },
    })
    .to_string()
}
