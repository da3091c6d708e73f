use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Body of `latest.json`.
#[derive(Debug, Deserialize, PartialEq)]
pub struct Latest {
    #[serde(default)]
    pub disclaimer: String,
    #[serde(default)]
    pub license: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    pub base: String,
    pub rates: BTreeMap<String, f64>,
}

/// Body of `currencies.json`: code to display name.
pub type Currencies = BTreeMap<String, String>;
