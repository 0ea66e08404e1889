use serde::{Deserialize, Serialize};

/// Name given to the singular `location` criterion
pub const LEGACY_LOCATION_NAME: &str = "location";

/// Weighted soft constraints for one scoring call
///
/// Every field is optional. A criterion that is absent, or whose weight is
/// not positive, takes no part in scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightedCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<ValueCriterion<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_bedrooms: Option<ValueCriterion<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_bathrooms: Option<ValueCriterion<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_garden: Option<WeightCriterion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_student: Option<ValueCriterion<bool>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<PropertyTypeCriterion>,
    /// Single-point form of `locations`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationCriterion>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<LocationCriterion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rooms: Option<RoomsCriterion>,
}

impl WeightedCriteria {
    /// All location points in scoring order: the singular `location` first
    /// (named [`LEGACY_LOCATION_NAME`] when unnamed), then `locations`
    pub fn all_locations(&self) -> Vec<LocationCriterion> {
        let mut points = Vec::with_capacity(self.locations.len() + 1);
        if let Some(legacy) = &self.location {
            let mut legacy = legacy.clone();
            if legacy.name.is_empty() {
                legacy.name = LEGACY_LOCATION_NAME.to_string();
            }
            points.push(legacy);
        }
        points.extend(self.locations.iter().cloned());
        points
    }

    /// Number of criteria with a positive weight
    pub fn active_count(&self) -> usize {
        let scalar = [
            self.max_price.as_ref().map(|c| c.weight),
            self.min_bedrooms.as_ref().map(|c| c.weight),
            self.min_bathrooms.as_ref().map(|c| c.weight),
            self.has_garden.as_ref().map(|c| c.weight),
            self.is_student.as_ref().map(|c| c.weight),
            self.property_type
                .as_ref()
                .filter(|c| !c.values.is_empty())
                .map(|c| c.weight),
            self.rooms
                .as_ref()
                .filter(|c| c.criteria.check_count() > 0)
                .map(|c| c.weight),
        ];

        let scalar_count = scalar
            .iter()
            .flatten()
            .filter(|weight| is_active(**weight))
            .count();
        let location_count = self
            .all_locations()
            .iter()
            .filter(|l| is_active(l.weight))
            .count();

        scalar_count + location_count
    }
}

/// A criterion with weight `0`, a negative weight or `NaN` is inert
#[inline]
pub fn is_active(weight: f64) -> bool {
    weight > 0.0
}

/// Target value paired with a weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueCriterion<T> {
    pub value: T,
    pub weight: f64,
}

/// Criterion whose target is implied by its kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightCriterion {
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyTypeCriterion {
    #[serde(default)]
    pub values: Vec<String>,
    pub weight: f64,
}

/// Named point the listing should be close to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationCriterion {
    #[serde(default)]
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    /// Radius in kilometers
    #[serde(rename = "maxDistance")]
    pub max_distance: f64,
    pub weight: f64,
}

/// Room bundle sharing a single weight across its sub-checks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomsCriterion {
    #[serde(default)]
    pub criteria: RoomRequirements,
    pub weight: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomRequirements {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_double_rooms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_ensuite_rooms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similar_sized_rooms: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_master_bedroom: Option<bool>,
}

impl RoomRequirements {
    pub fn check_count(&self) -> usize {
        usize::from(self.min_double_rooms.is_some())
            + usize::from(self.min_ensuite_rooms.is_some())
            + usize::from(self.similar_sized_rooms.is_some())
            + usize::from(self.has_master_bedroom.is_some())
    }
}
