use crate::models::{Location, Material, MaterialSet, MatchedPartner, Partner, RATING_RANGE};
use crate::services::{PartnerRow, RegistryError};
use std::cmp::Ordering;

/// Convert a registry row into a partner, rejecting values outside the domain
pub fn partner_from_row(row: PartnerRow) -> Result<Partner, RegistryError> {
    let materials = row
        .materials
        .iter()
        .map(|tag| {
            Material::from_tag(tag).ok_or_else(|| {
                RegistryError::InvalidRow(format!("partner {} has unknown material {:?}", row.id, tag))
            })
        })
        .collect::<Result<MaterialSet, _>>()?;

    if !RATING_RANGE.contains(&row.rating) {
        return Err(RegistryError::InvalidRow(format!(
            "partner {} has rating {} outside 0..=10",
            row.id, row.rating
        )));
    }

    Ok(Partner {
        id: row.id,
        name: row.name,
        location: Location::new(row.lat, row.lng),
        service_radius: row.radius,
        rating: row.rating,
        materials,
    })
}

/// Convert a proximity row into a matched partner; the row must carry a distance
pub fn matched_from_row(row: PartnerRow) -> Result<MatchedPartner, RegistryError> {
    let distance = row
        .distance
        .ok_or_else(|| RegistryError::InvalidRow(format!("partner {} has no distance", row.id)))?;

    Ok(MatchedPartner {
        partner: partner_from_row(row)?,
        distance,
    })
}

/// Whether a matched partner satisfies the proximity predicate
#[inline]
pub fn satisfies_predicate(matched: &MatchedPartner, required: &MaterialSet) -> bool {
    matched.distance < matched.partner.service_radius && required.is_subset(&matched.partner.materials)
}

/// Rating descending, then distance ascending
pub fn compare_ranked(a: &MatchedPartner, b: &MatchedPartner) -> Ordering {
    b.partner
        .rating
        .total_cmp(&a.partner.rating)
        .then_with(|| a.distance.total_cmp(&b.distance))
}

/// Sort matches in place; the sort is stable so full ties keep registry order
pub fn rank(matches: &mut [MatchedPartner]) {
    matches.sort_by(compare_ranked);
}
