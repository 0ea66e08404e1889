use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Listing response, scored or not
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertiesResponse<T> {
    pub properties: Vec<T>,
    pub count: usize,
    #[serde(rename = "totalCandidates", default, skip_serializing_if = "Option::is_none")]
    pub total_candidates: Option<usize>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertResponse {
    pub inserted: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Aggregate figures over the stored properties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsResponse {
    pub total: usize,
    #[serde(rename = "averagePrice")]
    pub average_price: f64,
    #[serde(rename = "studentProperties")]
    pub student_properties: usize,
    #[serde(rename = "withGarden")]
    pub with_garden: usize,
    #[serde(rename = "propertyTypes")]
    pub property_types: BTreeMap<String, usize>,
    #[serde(rename = "bedroomDistribution")]
    pub bedroom_distribution: BTreeMap<u32, usize>,
}
