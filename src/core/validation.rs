use crate::error::{MatchError, Result};
use crate::models::{Location, Material, MaterialSet, PartnerId};

/// Parse a `"<lat>,<lng>"` string into a location
///
/// Both halves must be finite floating-point numbers. Magnitudes are not
/// range-checked; out-of-range coordinates are left to the registry.
pub fn parse_location(raw: &str) -> Result<Location> {
    let malformed = || MatchError::MalformedLocation(raw.to_string());

    let mut parts = raw.split(',');
    let (Some(lat), Some(lng), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(malformed());
    };

    let lat: f64 = lat.parse().map_err(|_| malformed())?;
    let lng: f64 = lng.parse().map_err(|_| malformed())?;

    if !lat.is_finite() || !lng.is_finite() {
        return Err(malformed());
    }

    Ok(Location::new(lat, lng))
}

/// Parse a comma-separated material list, requiring at least one token
///
/// An empty input is a single empty token and is rejected like any other
/// unknown tag.
pub fn parse_required_materials(raw: &str) -> Result<MaterialSet> {
    raw.split(',')
        .map(|token| Material::from_tag(token).ok_or_else(|| MatchError::InvalidMaterial(token.to_string())))
        .collect()
}

/// Parse an optional material filter; an empty input means no filter
pub fn parse_material_filter(raw: &str) -> Result<MaterialSet> {
    if raw.is_empty() {
        return Ok(MaterialSet::new());
    }
    parse_required_materials(raw)
}

/// Parse a partner identifier (signed 16-bit)
pub fn parse_partner_id(raw: &str) -> Result<PartnerId> {
    raw.parse::<PartnerId>()
        .map_err(|_| MatchError::MalformedId(raw.to_string()))
}
