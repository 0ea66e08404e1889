use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rental property listing as supplied by the record source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Property {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub price: f64,
    #[serde(rename = "priceQualifier", default, skip_serializing_if = "Option::is_none")]
    pub price_qualifier: Option<String>,
    pub bedrooms: u32,
    pub bathrooms: u32,
    #[serde(rename = "propertyType")]
    pub property_type: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(rename = "hasGarden", default)]
    pub has_garden: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "isStudent", default)]
    pub is_student: bool,
    #[serde(rename = "furnishedStatus", default, skip_serializing_if = "Option::is_none")]
    pub furnished_status: Option<String>,
    #[serde(rename = "availableFrom", default, skip_serializing_if = "Option::is_none")]
    pub available_from: Option<String>,
    #[serde(rename = "addedOn", default, skip_serializing_if = "Option::is_none")]
    pub added_on: Option<String>,
    #[serde(rename = "scrapedAt", default, skip_serializing_if = "Option::is_none")]
    pub scraped_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(rename = "roomDetails", default, skip_serializing_if = "Option::is_none")]
    pub room_details: Option<RoomDetails>,
}

impl Property {
    /// Coordinates, if the listing carries both halves
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

/// Per-room breakdown extracted from the listing text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDetails {
    #[serde(rename = "doubleRooms", default)]
    pub double_rooms: u32,
    #[serde(rename = "singleRooms", default)]
    pub single_rooms: u32,
    #[serde(rename = "ensuiteRooms", default)]
    pub ensuite_rooms: u32,
    #[serde(rename = "hasMasterBedroom", default)]
    pub has_master_bedroom: bool,
    #[serde(rename = "similarSizedRooms", default)]
    pub similar_sized_rooms: bool,
}

/// Property with its relevance score for one scoring call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredProperty {
    #[serde(flatten)]
    pub property: Property,
    #[serde(rename = "relevanceScore")]
    pub relevance_score: f64,
    #[serde(rename = "matchDetails")]
    pub match_details: BTreeMap<String, MatchDetail>,
}

/// Outcome of a single criterion for a single property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDetail {
    pub matched: bool,
    pub contribution: f64,
    #[serde(flatten)]
    pub detail: CriterionDetail,
}

/// Criterion-specific payload of a [`MatchDetail`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "criterion", rename_all = "camelCase")]
pub enum CriterionDetail {
    Price,
    Bedrooms,
    Bathrooms,
    Garden,
    Student,
    PropertyType,
    Location {
        name: String,
        /// Great-circle distance in kilometers
        distance: f64,
    },
    Rooms {
        checks: Vec<RoomCheck>,
    },
}

/// Partial score (0-1) of one room sub-check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomCheck {
    pub check: String,
    pub score: f64,
}
