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
//! Decoded Pi-hole statistics

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Status string Pi-hole reports while blocking is active
pub const ENABLED_STATUS: &str = "enabled";

/// One decoded `api.php` response.
///
/// Missing fields decode to zero or empty and unknown fields are ignored.
/// Mapping fields accept `[]` for "no entries", which Pi-hole emits when it
/// does not honour `jsonForceObject`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub domains_being_blocked: u64,
    pub dns_queries_today: u64,
    pub ads_blocked_today: u64,
    pub ads_percentage_today: f64,
    pub unique_domains: u64,
    pub queries_forwarded: u64,
    pub queries_cached: u64,
    pub clients_ever_seen: u64,
    pub unique_clients: u64,
    pub dns_queries_all_types: u64,

    #[serde(rename = "reply_NODATA")]
    pub reply_nodata: u64,
    #[serde(rename = "reply_NXDOMAIN")]
    pub reply_nxdomain: u64,
    #[serde(rename = "reply_CNAME")]
    pub reply_cname: u64,
    #[serde(rename = "reply_IP")]
    pub reply_ip: u64,

    /// Domain -> query count
    #[serde(deserialize_with = "object_or_empty_array")]
    pub top_queries: BTreeMap<String, u64>,
    /// Domain -> blocked query count
    #[serde(deserialize_with = "object_or_empty_array")]
    pub top_ads: BTreeMap<String, u64>,
    /// Client -> query count
    #[serde(deserialize_with = "object_or_empty_array")]
    pub top_sources: BTreeMap<String, u64>,
    /// Upstream -> percentage of queries
    #[serde(deserialize_with = "object_or_empty_array")]
    pub forward_destinations: BTreeMap<String, f64>,
    /// Record type -> percentage of queries
    #[serde(rename = "querytypes", deserialize_with = "object_or_empty_array")]
    pub query_types: BTreeMap<String, f64>,

    pub status: String,
}

impl Snapshot {
    /// Decode a response body.
    ///
    /// The document must be a JSON object; Pi-hole answers `[]` to requests it
    /// does not authorize. Top-level `null` values count as missing fields.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        let mut fields: Map<String, Value> = serde_json::from_slice(body)?;
        fields.retain(|_, value| !value.is_null());
        serde_json::from_value(Value::Object(fields))
    }

    /// Exact match against [`ENABLED_STATUS`]; anything else counts as disabled
    pub fn is_enabled(&self) -> bool {
        self.status == ENABLED_STATUS
    }

    /// Number of mapping entries across all dynamic fields
    pub fn mapping_entries(&self) -> usize {
        self.top_queries.len()
            + self.top_ads.len()
            + self.top_sources.len()
            + self.forward_destinations.len()
            + self.query_types.len()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ObjectOrList<V> {
    Object(BTreeMap<String, V>),
    List(Vec<V>),
}

fn object_or_empty_array<'de, D, V>(deserializer: D) -> Result<BTreeMap<String, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    match ObjectOrList::deserialize(deserializer)? {
        ObjectOrList::Object(map) => Ok(map),
        ObjectOrList::List(list) if list.is_empty() => Ok(BTreeMap::new()),
        ObjectOrList::List(_) => Err(D::Error::custom(
            "expected an object, found a non-empty array",
        )),
    }
}
