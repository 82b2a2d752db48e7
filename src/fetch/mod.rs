//! Retrieval of the published Actions address ranges.

mod client;

pub use client::MetaClient;

use log::warn;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::TrackerError;
use crate::ranges::RangeSet;

/// Keys of the metadata document holding Actions runner ranges. Some accounts
/// see the split IPv4/IPv6 keys instead of, or next to, `actions`.
pub const ACTIONS_KEYS: [&str; 3] = ["actions", "actions_ipv4", "actions_ipv6"];

pub trait Source {
    fn fetch(&self) -> Result<RangeSet, TrackerError>;
}

#[derive(Debug, Deserialize)]
struct MetaResponse {
    #[serde(default)]
    actions: Option<Vec<String>>,

    #[serde(default)]
    actions_ipv4: Option<Vec<String>>,

    #[serde(default)]
    actions_ipv6: Option<Vec<String>>,
}

impl MetaResponse {
    fn into_ranges(self) -> RangeSet {
        let mut ranges = RangeSet::new();
        let categories = ACTIONS_KEYS
            .iter()
            .zip(vec![self.actions, self.actions_ipv4, self.actions_ipv6]);

        for (key, entries) in categories {
            if let Some(entries) = entries {
                ranges.insert(key, entries);
            }
        }

        ranges
    }
}

/// A document without any recognized key means the upstream schema changed,
/// so it is an error rather than an empty set.
pub fn parse_meta(body: &str) -> Result<RangeSet, TrackerError> {
    let unexpected = |err: serde_json::Error| {
        TrackerError::Format(format!(
            "GitHub API returned an unexpected response: {}",
            err
        ))
    };

    // the derived impl would also fill the fields from a JSON array
    let document: Map<String, Value> = serde_json::from_str(body).map_err(unexpected)?;
    let meta = MetaResponse::deserialize(Value::Object(document)).map_err(unexpected)?;

    let ranges = meta.into_ranges();
    if ranges.is_empty() {
        return Err(TrackerError::Format(
            "GitHub API did not return any Actions IP ranges. \
             The response structure may have changed."
                .to_owned(),
        ));
    }

    for (key, entry) in ranges.invalid_entries() {
        warn!("{} contains an entry that is not a CIDR block: {}", key, entry);
    }

    Ok(ranges)
}
