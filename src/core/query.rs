use crate::models::{Location, MaterialSet, PartnerId};

const PARTNER_COLUMNS: &str = "id, name, lat, lng, radius, rating, flooring_experience AS materials";

/// Value bound to a positional query parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundParam {
    SmallInt(i16),
    Double(f64),
}

/// A query against the partner registry
///
/// Numeric inputs are always sent as bound parameters. Materials are embedded
/// as string literals, which is only possible from a `MaterialSet` and
/// therefore only from the closed `Material` enum.
#[derive(Debug, Clone, PartialEq)]
pub enum PartnerQuery {
    /// Exact match on the partner id
    ById(PartnerId),
    /// Partners whose own radius covers `location` and who handle every
    /// requested material, best rated first, then nearest first
    Proximity {
        location: Location,
        materials: MaterialSet,
    },
    /// Partners handling every material of the filter (all partners when the
    /// filter is empty), by id
    Listing { materials: MaterialSet },
}

impl PartnerQuery {
    /// SQL text of the query, with `$n` placeholders for `params()`
    pub fn sql(&self) -> String {
        match self {
            PartnerQuery::ById(_) => format!(
                "SELECT {PARTNER_COLUMNS}, NULL::DOUBLE PRECISION AS distance \
                 FROM partners \
                 WHERE id = $1"
            ),
            PartnerQuery::Proximity { materials, .. } => format!(
                "SELECT {PARTNER_COLUMNS}, get_distance($1, $2, lat, lng) AS distance \
                 FROM partners \
                 WHERE get_distance($1, $2, lat, lng) < radius \
                 AND flooring_experience @> {} \
                 ORDER BY rating DESC, distance ASC",
                material_array(materials)
            ),
            PartnerQuery::Listing { materials } if materials.is_empty() => format!(
                "SELECT {PARTNER_COLUMNS}, NULL::DOUBLE PRECISION AS distance \
                 FROM partners \
                 ORDER BY id ASC"
            ),
            PartnerQuery::Listing { materials } => format!(
                "SELECT {PARTNER_COLUMNS}, NULL::DOUBLE PRECISION AS distance \
                 FROM partners \
                 WHERE flooring_experience @> {} \
                 ORDER BY id ASC",
                material_array(materials)
            ),
        }
    }

    /// Parameters in placeholder order
    pub fn params(&self) -> Vec<BoundParam> {
        match self {
            PartnerQuery::ById(id) => vec![BoundParam::SmallInt(*id)],
            PartnerQuery::Proximity { location, .. } => {
                vec![BoundParam::Double(location.lat), BoundParam::Double(location.lng)]
            }
            PartnerQuery::Listing { .. } => Vec::new(),
        }
    }
}

/// Render a material set as a PostgreSQL text array literal
fn material_array(materials: &MaterialSet) -> String {
    let literals: Vec<String> = materials
        .iter()
        .map(|material| format!("'{}'", material.as_str()))
        .collect();
    format!("ARRAY[{}]::TEXT[]", literals.join(","))
}
