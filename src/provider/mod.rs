pub mod cloudflare;

use serde::{Deserialize, Serialize};

/// Outcome of a successful credential check against a zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneValidation {
    pub zone_id: String,
    pub records: Vec<ExistingRecord>,
}

/// A record already present in the zone, reported back to the front-end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub content: String,
    #[serde(default)]
    pub proxied: bool,
}
