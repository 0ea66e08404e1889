use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::{Property, StatsResponse};

/// Errors that can occur while loading seed data
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Seed file error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Seed file is not a JSON array of properties: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Records plus a position index keyed by id
#[derive(Debug, Default)]
struct Records {
    properties: Vec<Property>,
    positions: HashMap<String, usize>,
}

impl Records {
    fn upsert(&mut self, mut property: Property) {
        if property.id.is_empty() {
            property.id = uuid::Uuid::new_v4().to_string();
        }

        match self.positions.get(&property.id) {
            Some(&position) => self.properties[position] = property,
            None => {
                self.positions.insert(property.id.clone(), self.properties.len());
                self.properties.push(property);
            }
        }
    }

    fn clear(&mut self) {
        self.properties.clear();
        self.positions.clear();
    }
}

/// In-memory property store
///
/// Records are kept in insertion order. Upserting an existing id replaces
/// the record in place.
#[derive(Debug, Default)]
pub struct PropertyStore {
    records: RwLock<Records>,
}

impl PropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from existing records, collapsing repeated ids
    pub fn with_properties(properties: Vec<Property>) -> Self {
        let mut records = Records::default();
        for property in properties {
            records.upsert(property);
        }

        Self {
            records: RwLock::new(records),
        }
    }

    /// Read a JSON array of properties from disk
    pub async fn load_seed<P: AsRef<Path>>(path: P) -> Result<Vec<Property>, StoreError> {
        let bytes = tokio::fs::read(path.as_ref()).await?;
        let properties: Vec<Property> = serde_json::from_slice(&bytes)?;

        tracing::debug!(
            "Read {} seed properties from {}",
            properties.len(),
            path.as_ref().display()
        );

        Ok(properties)
    }

    /// Insert or replace properties by id, returning how many were written
    ///
    /// Records with an empty id are assigned a fresh UUID.
    pub async fn upsert_many(&self, incoming: Vec<Property>) -> usize {
        let mut records = self.records.write().await;
        let written = incoming.len();

        for property in incoming {
            records.upsert(property);
        }

        written
    }

    /// Snapshot of all stored properties
    pub async fn all(&self) -> Vec<Property> {
        self.records.read().await.properties.clone()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.properties.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.properties.is_empty()
    }

    pub async fn clear(&self) {
        self.records.write().await.clear();
    }

    pub async fn stats(&self) -> StatsResponse {
        compute_stats(&self.records.read().await.properties)
    }
}

/// Aggregate counts and the mean price over a set of properties
pub fn compute_stats(properties: &[Property]) -> StatsResponse {
    let total = properties.len();
    let average_price = if total > 0 {
        properties.iter().map(|p| p.price).sum::<f64>() / total as f64
    } else {
        0.0
    };

    let mut property_types = BTreeMap::new();
    let mut bedroom_distribution = BTreeMap::new();
    for property in properties {
        *property_types.entry(property.property_type.clone()).or_insert(0) += 1;
        *bedroom_distribution.entry(property.bedrooms).or_insert(0) += 1;
    }

    StatsResponse {
        total,
        average_price,
        student_properties: properties.iter().filter(|p| p.is_student).count(),
        with_garden: properties.iter().filter(|p| p.has_garden).count(),
        property_types,
        bedroom_distribution,
    }
}
