//! Partner Match - finds flooring partners for a customer
//!
//! Given a customer location and the materials a job needs, the matcher
//! returns every partner whose own service radius covers the location and who
//! handles all of the materials, best rated first and nearest first.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::PartnerMatcher;
pub use crate::error::MatchError;
pub use crate::models::{Location, Material, MaterialSet, MatchResponse, MatchedPartner, Partner};
pub use crate::services::{InMemoryRegistry, PartnerRegistry, PostgresRegistry, RegistryError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let materials = MaterialSet::from(Material::ALL);
        assert_eq!(materials.len(), 3);
    }
}
