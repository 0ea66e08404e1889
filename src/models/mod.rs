// Model exports
pub mod criteria;
pub mod domain;
pub mod requests;
pub mod responses;

pub use criteria::{WeightedCriteria, ValueCriterion, WeightCriterion, PropertyTypeCriterion, LocationCriterion, RoomsCriterion, RoomRequirements, is_active};
pub use domain::{Property, RoomDetails, ScoredProperty, MatchDetail, CriterionDetail, RoomCheck};
pub use requests::{PropertyQuery, ScoreRequest, InsertPropertiesRequest};
pub use responses::{PropertiesResponse, HealthResponse, ErrorResponse, InsertResponse, MessageResponse, StatsResponse};
