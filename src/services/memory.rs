use crate::core::PartnerQuery;
use crate::models::{Location, MaterialSet, Partner};
use crate::services::registry::{PartnerRegistry, PartnerRow, RegistryError};
use async_trait::async_trait;
use geo::{HaversineDistance, Point};
use std::sync::atomic::{AtomicUsize, Ordering};

type DistanceFn = dyn Fn(Location, Location) -> f64 + Send + Sync;

/// Great-circle distance in kilometres, the same unit as the SQL `get_distance`
pub fn haversine_km(from: Location, to: Location) -> f64 {
    Point::new(from.lng, from.lat).haversine_distance(&Point::new(to.lng, to.lat)) / 1000.0
}

/// In-memory partner registry
///
/// Evaluates queries the way the PostgreSQL schema does, with a pluggable
/// distance function. Counts every `fetch` so callers can check how many round
/// trips an operation made.
pub struct InMemoryRegistry {
    rows: Vec<PartnerRow>,
    distance: Box<DistanceFn>,
    unavailable: Option<String>,
    calls: AtomicUsize,
}

impl InMemoryRegistry {
    pub fn new(partners: impl IntoIterator<Item = Partner>) -> Self {
        Self::from_rows(partners.into_iter().map(PartnerRow::from))
    }

    /// Build from raw rows, including rows a real registry could hold but the
    /// domain rejects
    pub fn from_rows(rows: impl IntoIterator<Item = PartnerRow>) -> Self {
        Self {
            rows: rows.into_iter().collect(),
            distance: Box::new(haversine_km),
            unavailable: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Replace the distance function (query location, partner location)
    pub fn with_distance<F>(mut self, distance: F) -> Self
    where
        F: Fn(Location, Location) -> f64 + Send + Sync + 'static,
    {
        self.distance = Box::new(distance);
        self
    }

    /// Make every call fail as if the datastore were unreachable
    pub fn unavailable(mut self, reason: impl Into<String>) -> Self {
        self.unavailable = Some(reason.into());
        self
    }

    /// Number of `fetch` calls made so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), RegistryError> {
        match &self.unavailable {
            Some(reason) => Err(RegistryError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }
}

fn handles_all(row: &PartnerRow, materials: &MaterialSet) -> bool {
    materials
        .iter()
        .all(|material| row.materials.iter().any(|tag| tag == material.as_str()))
}

#[async_trait]
impl PartnerRegistry for InMemoryRegistry {
    async fn fetch(&self, query: &PartnerQuery) -> Result<Vec<PartnerRow>, RegistryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let rows = match query {
            PartnerQuery::ById(id) => self.rows.iter().filter(|row| row.id == *id).cloned().collect(),
            PartnerQuery::Proximity { location, materials } => {
                let mut rows: Vec<PartnerRow> = self
                    .rows
                    .iter()
                    .filter(|row| handles_all(row, materials))
                    .filter_map(|row| {
                        let distance = (self.distance)(*location, Location::new(row.lat, row.lng));
                        (distance < row.radius).then(|| PartnerRow {
                            distance: Some(distance),
                            ..row.clone()
                        })
                    })
                    .collect();
                rows.sort_by(|a, b| {
                    b.rating
                        .total_cmp(&a.rating)
                        .then_with(|| a.distance.unwrap_or_default().total_cmp(&b.distance.unwrap_or_default()))
                });
                rows
            }
            PartnerQuery::Listing { materials } => {
                let mut rows: Vec<PartnerRow> = self
                    .rows
                    .iter()
                    .filter(|row| handles_all(row, materials))
                    .cloned()
                    .collect();
                rows.sort_by_key(|row| row.id);
                rows
            }
        };

        Ok(rows)
    }

    async fn ping(&self) -> Result<(), RegistryError> {
        self.check_available()
    }
}

impl From<Partner> for PartnerRow {
    fn from(partner: Partner) -> Self {
        Self {
            id: partner.id,
            name: partner.name,
            lat: partner.location.lat,
            lng: partner.location.lng,
            radius: partner.service_radius,
            rating: partner.rating,
            materials: partner.materials.iter().map(|m| m.as_str().to_string()).collect(),
            distance: None,
        }
    }
}
