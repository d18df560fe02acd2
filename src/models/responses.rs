use serde::{Deserialize, Serialize};
use crate::models::domain::MatchedPartner;

/// Response for the proximity match endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub phone: String,
    #[serde(rename = "sqm")]
    pub square_meters: String,
    pub partners: Vec<MatchedPartner>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
