use serde::{Deserialize, Serialize};

/// Query string of the proximity match endpoint
///
/// All fields are kept as raw strings; validation happens in the matcher so
/// that every caller goes through the same checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchPartnersRequest {
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default)]
    pub material: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub sqm: String,
}

fn default_address() -> String {
    "0,0".to_string()
}

/// Query string of the partner listing endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPartnersRequest {
    #[serde(default)]
    pub material: String,
}
