//! Telco finder response shapes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelcoFinderNetworkIdResponse {
    pub network_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelcoFinderProperties {
    #[serde(rename = "operator_Id", default)]
    pub operator_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelcoFinderLink {
    pub rel: String,
    pub href: String,
}

/// WebFinger-style lookup result for a phone number or IP subject.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelcoFinderSearchResponse {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub properties: TelcoFinderProperties,
    #[serde(default)]
    pub links: Vec<TelcoFinderLink>,
}

impl TelcoFinderSearchResponse {
    /// First link with the given relation.
    #[must_use]
    pub fn link(&self, rel: &str) -> Option<&str> {
        self.links.iter().find(|link| link.rel == rel).map(|link| link.href.as_str())
    }
}
