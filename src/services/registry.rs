use crate::core::PartnerQuery;
use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by a partner registry
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid row: {0}")]
    InvalidRow(String),

    #[error("Registry unavailable: {0}")]
    Unavailable(String),
}

/// Raw partner row as returned by the registry
///
/// `distance` is only set for proximity queries.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct PartnerRow {
    pub id: i16,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub radius: f64,
    pub rating: f64,
    pub materials: Vec<String>,
    pub distance: Option<f64>,
}

/// Read access to the partner registry
///
/// One call is one round trip; implementations must not retry or cache.
#[async_trait]
pub trait PartnerRegistry: Send + Sync {
    /// Execute a query and return every row it yields
    async fn fetch(&self, query: &PartnerQuery) -> Result<Vec<PartnerRow>, RegistryError>;

    /// Check that the registry is reachable
    async fn ping(&self) -> Result<(), RegistryError>;
}
