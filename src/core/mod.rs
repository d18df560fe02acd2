// Core matching engine exports
pub mod matcher;
pub mod query;
pub mod ranking;
pub mod validation;

pub use matcher::PartnerMatcher;
pub use query::{BoundParam, PartnerQuery};
pub use ranking::{compare_ranked, matched_from_row, partner_from_row, rank, satisfies_predicate};
pub use validation::{parse_location, parse_material_filter, parse_partner_id, parse_required_materials};
