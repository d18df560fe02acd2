// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Location, Material, MaterialSet, MatchQuery, MatchedPartner, Partner, PartnerId, RATING_RANGE};
pub use requests::{ListPartnersRequest, MatchPartnersRequest};
pub use responses::{ErrorResponse, HealthResponse, MatchResponse};
