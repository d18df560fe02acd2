use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Partner identifier as assigned by the registry
pub type PartnerId = i16;

/// Latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Flooring material a partner can work with.
///
/// The domain is closed: a `Material` can only be obtained from one of these
/// variants, so every value reaching query construction is one of three
/// fixed literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Material {
    Carpet,
    Tiles,
    Wood,
}

impl Material {
    pub const ALL: [Material; 3] = [Material::Carpet, Material::Tiles, Material::Wood];

    pub fn as_str(self) -> &'static str {
        match self {
            Material::Carpet => "carpet",
            Material::Tiles => "tiles",
            Material::Wood => "wood",
        }
    }

    /// Exact, case-sensitive lookup of a material tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "carpet" => Some(Material::Carpet),
            "tiles" => Some(Material::Tiles),
            "wood" => Some(Material::Wood),
            _ => None,
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered, duplicate-free set of materials
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialSet(BTreeSet<Material>);

impl MaterialSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, material: Material) -> bool {
        self.0.insert(material)
    }

    pub fn contains(&self, material: Material) -> bool {
        self.0.contains(&material)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when every material in `self` is also in `other`
    pub fn is_subset(&self, other: &MaterialSet) -> bool {
        self.0.is_subset(&other.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = Material> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Material> for MaterialSet {
    fn from_iter<I: IntoIterator<Item = Material>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[Material; N]> for MaterialSet {
    fn from(materials: [Material; N]) -> Self {
        materials.into_iter().collect()
    }
}

/// Flooring partner as stored in the registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub id: PartnerId,
    pub name: String,
    pub location: Location,
    #[serde(rename = "serviceRadius")]
    pub service_radius: f64,
    pub rating: f64,
    pub materials: MaterialSet,
}

/// Partner returned by a proximity match, with the registry-computed distance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedPartner {
    #[serde(flatten)]
    pub partner: Partner,
    pub distance: f64,
}

/// Validated proximity match input
#[derive(Debug, Clone, PartialEq)]
pub struct MatchQuery {
    pub location: Location,
    pub required_materials: MaterialSet,
    pub phone: String,
    pub square_meters: String,
}

/// Partner ratings are bounded to this range
pub const RATING_RANGE: std::ops::RangeInclusive<f64> = 0.0..=10.0;
