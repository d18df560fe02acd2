// Service exports
pub mod memory;
pub mod postgres;
pub mod registry;

pub use memory::{haversine_km, InMemoryRegistry};
pub use postgres::PostgresRegistry;
pub use registry::{PartnerRegistry, PartnerRow, RegistryError};
