use crate::core::{
    query::PartnerQuery,
    ranking::{matched_from_row, partner_from_row, rank, satisfies_predicate},
    validation::{parse_location, parse_material_filter, parse_partner_id, parse_required_materials},
};
use crate::error::{MatchError, Result};
use crate::models::{MatchQuery, MatchResponse, MatchedPartner, Partner};
use crate::services::PartnerRegistry;
use std::sync::Arc;

/// Partner matching engine
///
/// Every operation validates its raw input first, then makes exactly one
/// registry call, then assembles the result. Input errors never reach the
/// registry.
#[derive(Clone)]
pub struct PartnerMatcher {
    registry: Arc<dyn PartnerRegistry>,
}

impl PartnerMatcher {
    pub fn new(registry: Arc<dyn PartnerRegistry>) -> Self {
        Self { registry }
    }

    /// Validate raw proximity match parameters
    pub fn parse_match_query(
        address: &str,
        material: &str,
        phone: &str,
        square_meters: &str,
    ) -> Result<MatchQuery> {
        Ok(MatchQuery {
            location: parse_location(address)?,
            required_materials: parse_required_materials(material)?,
            phone: phone.to_string(),
            square_meters: square_meters.to_string(),
        })
    }

    /// Resolve a single partner by its raw id
    pub async fn lookup_partner(&self, id: &str) -> Result<Partner> {
        let id = parse_partner_id(id)?;

        let rows = self.registry.fetch(&PartnerQuery::ById(id)).await?;
        if rows.len() > 1 {
            tracing::warn!("Registry returned {} rows for partner {}, using the first", rows.len(), id);
        }

        match rows.into_iter().next() {
            Some(row) => Ok(partner_from_row(row)?),
            None => Err(MatchError::NotFound(id)),
        }
    }

    /// Find every partner whose own radius covers the address and who handles
    /// all requested materials, best rated first, then nearest first
    pub async fn match_partners(
        &self,
        address: &str,
        material: &str,
        phone: &str,
        square_meters: &str,
    ) -> Result<MatchResponse> {
        let query = Self::parse_match_query(address, material, phone, square_meters)?;
        self.execute_match(query).await
    }

    /// Run an already validated proximity match
    pub async fn execute_match(&self, query: MatchQuery) -> Result<MatchResponse> {
        let MatchQuery {
            location,
            required_materials,
            phone,
            square_meters,
        } = query;

        tracing::debug!(
            "Matching partners at ({}, {}) for {} materials",
            location.lat,
            location.lng,
            required_materials.len()
        );

        let rows = self
            .registry
            .fetch(&PartnerQuery::Proximity {
                location,
                materials: required_materials.clone(),
            })
            .await?;
        let total_rows = rows.len();

        let mut partners = rows
            .into_iter()
            .map(matched_from_row)
            .collect::<std::result::Result<Vec<MatchedPartner>, _>>()?;

        partners.retain(|matched| {
            let keep = satisfies_predicate(matched, &required_materials);
            if !keep {
                tracing::warn!(
                    "Dropping partner {} returned by registry outside the match predicate (distance {}, radius {})",
                    matched.partner.id,
                    matched.distance,
                    matched.partner.service_radius
                );
            }
            keep
        });
        rank(&mut partners);

        tracing::info!("Matched {} partners (from {} registry rows)", partners.len(), total_rows);

        Ok(MatchResponse {
            phone,
            square_meters,
            partners,
        })
    }

    /// List partners handling every material of an optional filter, by id
    pub async fn list_partners(&self, material: &str) -> Result<Vec<Partner>> {
        let materials = parse_material_filter(material)?;

        let rows = self.registry.fetch(&PartnerQuery::Listing { materials }).await?;

        let partners = rows
            .into_iter()
            .map(partner_from_row)
            .collect::<std::result::Result<Vec<Partner>, _>>()?;

        Ok(partners)
    }

    /// Whether the registry answers
    pub async fn registry_healthy(&self) -> bool {
        match self.registry.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Registry health check failed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Location, Material, MaterialSet};
    use crate::services::{InMemoryRegistry, PartnerRow};

    fn partner(id: i16, rating: f64, radius: f64, materials: &[Material]) -> Partner {
        Partner {
            id,
            name: format!("Partner {}", id),
            location: Location::new(40.0 + id as f64 * 0.01, 113.3),
            service_radius: radius,
            rating,
            materials: materials.iter().copied().collect(),
        }
    }

    fn matcher_with(registry: InMemoryRegistry) -> (PartnerMatcher, Arc<InMemoryRegistry>) {
        let registry = Arc::new(registry);
        (PartnerMatcher::new(registry.clone()), registry)
    }

    #[test]
    fn test_parse_match_query() {
        let query = PartnerMatcher::parse_match_query("1.5,2.5", "tiles,wood", "0160", "65.22").unwrap();

        assert_eq!(query.location, Location::new(1.5, 2.5));
        assert_eq!(query.required_materials, MaterialSet::from([Material::Tiles, Material::Wood]));
        assert_eq!(query.phone, "0160");
        assert_eq!(query.square_meters, "65.22");
    }

    #[tokio::test]
    async fn test_lookup_found() {
        let (matcher, registry) = matcher_with(InMemoryRegistry::new(vec![
            partner(1, 8.0, 10.0, &[Material::Wood]),
            partner(2, 6.0, 10.0, &[Material::Tiles]),
        ]));

        let found = matcher.lookup_partner("2").await.unwrap();

        assert_eq!(found.id, 2);
        assert_eq!(found.materials, MaterialSet::from([Material::Tiles]));
        assert_eq!(registry.call_count(), 1);
    }

    #[tokio::test]
    async fn test_lookup_missing_is_not_found() {
        let (matcher, _) = matcher_with(InMemoryRegistry::new(vec![partner(1, 8.0, 10.0, &[Material::Wood])]));

        assert!(matches!(matcher.lookup_partner("99").await, Err(MatchError::NotFound(99))));
    }

    #[tokio::test]
    async fn test_lookup_malformed_id_skips_registry() {
        let (matcher, registry) = matcher_with(InMemoryRegistry::new(Vec::new()));

        assert!(matches!(matcher.lookup_partner("one").await, Err(MatchError::MalformedId(_))));
        assert_eq!(registry.call_count(), 0);
    }

    #[tokio::test]
    async fn test_match_drops_rows_outside_predicate() {
        // A registry whose distance ignores the radius check is simulated by a
        // raw row that already carries a distance beyond its radius.
        struct LeakyRegistry;

        #[async_trait::async_trait]
        impl PartnerRegistry for LeakyRegistry {
            async fn fetch(&self, _query: &PartnerQuery) -> std::result::Result<Vec<PartnerRow>, crate::services::RegistryError> {
                let mut near = PartnerRow::from(partner(1, 5.0, 10.0, &[Material::Wood]));
                near.distance = Some(4.0);
                let mut far = PartnerRow::from(partner(2, 9.0, 3.0, &[Material::Wood]));
                far.distance = Some(4.0);
                Ok(vec![far, near])
            }

            async fn ping(&self) -> std::result::Result<(), crate::services::RegistryError> {
                Ok(())
            }
        }

        let matcher = PartnerMatcher::new(Arc::new(LeakyRegistry));
        let response = matcher.match_partners("0,0", "wood", "", "").await.unwrap();

        let ids: Vec<i16> = response.partners.iter().map(|m| m.partner.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[tokio::test]
    async fn test_list_partners_with_and_without_filter() {
        let (matcher, _) = matcher_with(InMemoryRegistry::new(vec![
            partner(3, 8.0, 10.0, &[Material::Wood, Material::Tiles]),
            partner(1, 6.0, 10.0, &[Material::Tiles]),
            partner(2, 7.0, 10.0, &[Material::Carpet]),
        ]));

        let all: Vec<i16> = matcher.list_partners("").await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(all, vec![1, 2, 3]);

        let tiles: Vec<i16> = matcher.list_partners("tiles").await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(tiles, vec![1, 3]);

        assert!(matches!(matcher.list_partners("stone").await, Err(MatchError::InvalidMaterial(t)) if t == "stone"));
    }

    #[tokio::test]
    async fn test_registry_failure_is_surfaced() {
        let (matcher, _) = matcher_with(InMemoryRegistry::new(Vec::new()).unavailable("connection refused"));

        assert!(matches!(
            matcher.match_partners("1,1", "wood", "", "").await,
            Err(MatchError::Registry(_))
        ));
        assert!(!matcher.registry_healthy().await);
    }
}
