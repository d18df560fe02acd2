use crate::models::PartnerId;
use crate::services::RegistryError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MatchError>;

/// Errors returned by partner lookups and matches
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Malformed location {0:?}: expected \"<lat>,<lng>\"")]
    MalformedLocation(String),

    #[error("Malformed partner id {0:?}")]
    MalformedId(String),

    #[error("Material {0:?} is not allowed in query")]
    InvalidMaterial(String),

    #[error("Partner {0} not found")]
    NotFound(PartnerId),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
}

impl MatchError {
    /// Short machine-readable kind, used as the `error` field of HTTP responses
    pub fn kind(&self) -> &'static str {
        match self {
            MatchError::MalformedLocation(_) => "malformed_location",
            MatchError::MalformedId(_) => "malformed_id",
            MatchError::InvalidMaterial(_) => "invalid_material",
            MatchError::NotFound(_) => "not_found",
            MatchError::Registry(_) => "registry_error",
        }
    }

    /// True for errors caused by the caller's input
    pub fn is_rejected_input(&self) -> bool {
        matches!(
            self,
            MatchError::MalformedLocation(_) | MatchError::MalformedId(_) | MatchError::InvalidMaterial(_)
        )
    }
}
