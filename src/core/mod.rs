// Core algorithm exports
pub mod distance;
pub mod ranker;
pub mod scoring;

pub use distance::haversine_distance;
pub use ranker::{rank, round2, score_properties, score_property, RankResult};
pub use scoring::CriterionScore;
