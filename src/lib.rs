//! Rental Ranker - weighted multi-criteria relevance ranking for rental listings
//!
//! Listings are never filtered out. Each active criterion awards partial
//! credit up to its weight, and the achieved total is normalized to a 0-100
//! relevance score that is comparable within one scoring call.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{haversine_distance, rank, score_properties, score_property, RankResult};
pub use models::{Property, RoomDetails, WeightedCriteria, ScoredProperty, MatchDetail, CriterionDetail};
