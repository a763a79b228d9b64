//! SIM swap request and response shapes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default)]
pub struct SimSwapCheckParams {
    /// Overrides the phone number the client was bound to.
    pub phone_number: Option<String>,
    /// Look-back window in hours.
    pub max_age: Option<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct SimSwapRetrieveDateParams {
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimSwapCheckResponse {
    pub swapped: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimSwapRetrieveDateResponse {
    /// RFC 3339 timestamp of the latest SIM change, as reported.
    #[serde(default)]
    pub latest_sim_change: String,
}
