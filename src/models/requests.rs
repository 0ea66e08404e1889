use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::{Property, WeightedCriteria};

/// Query string for listing stored properties
///
/// `filters` carries a JSON-encoded [`WeightedCriteria`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PropertyQuery {
    #[serde(default)]
    pub filters: Option<String>,
    #[validate(range(min = 1, max = 1000))]
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Score an ad-hoc set of records without touching the store
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScoreRequest {
    #[validate(length(max = 10000))]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub criteria: WeightedCriteria,
    #[validate(range(min = 1, max = 1000))]
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Upsert records into the store
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InsertPropertiesRequest {
    #[validate(length(min = 1, max = 10000))]
    pub properties: Vec<Property>,
}
