use std::collections::BTreeMap;

use crate::core::scoring::{
    score_garden, score_location, score_max_price, score_min_bathrooms, score_min_bedrooms,
    score_property_type, score_rooms, score_student, CriterionScore,
};
use crate::models::criteria::LEGACY_LOCATION_NAME;
use crate::models::{is_active, MatchDetail, Property, ScoredProperty, WeightedCriteria};

/// Result of a ranking call
#[derive(Debug)]
pub struct RankResult {
    pub properties: Vec<ScoredProperty>,
    pub total_candidates: usize,
}

/// Running numerator, denominator and breakdown for one property
#[derive(Debug, Default)]
struct Tally {
    achieved: f64,
    max_achievable: f64,
    details: BTreeMap<String, MatchDetail>,
}

impl Tally {
    fn add(&mut self, key: String, score: CriterionScore) {
        self.achieved += score.achieved;
        self.max_achievable += score.max_achievable;
        self.details.insert(key, score.into_match_detail());
    }

    fn relevance(&self) -> f64 {
        if self.max_achievable > 0.0 {
            round2(self.achieved / self.max_achievable * 100.0)
        } else {
            0.0
        }
    }
}

/// Score one property against every active criterion
///
/// Criteria are visited in a fixed order: price, bedrooms, bathrooms,
/// garden, student, property type, locations, rooms.
pub fn score_property(property: Property, criteria: &WeightedCriteria) -> ScoredProperty {
    let mut tally = Tally::default();

    if let Some(c) = criteria.max_price.as_ref().filter(|c| is_active(c.weight)) {
        tally.add("price".to_string(), score_max_price(&property, c));
    }

    if let Some(c) = criteria.min_bedrooms.as_ref().filter(|c| is_active(c.weight)) {
        tally.add("bedrooms".to_string(), score_min_bedrooms(&property, c));
    }

    if let Some(c) = criteria.min_bathrooms.as_ref().filter(|c| is_active(c.weight)) {
        tally.add("bathrooms".to_string(), score_min_bathrooms(&property, c));
    }

    if let Some(c) = criteria.has_garden.as_ref().filter(|c| is_active(c.weight)) {
        tally.add("hasGarden".to_string(), score_garden(&property, c));
    }

    if let Some(c) = criteria.is_student.as_ref().filter(|c| is_active(c.weight)) {
        tally.add("isStudent".to_string(), score_student(&property, c));
    }

    if let Some(c) = criteria
        .property_type
        .as_ref()
        .filter(|c| is_active(c.weight) && !c.values.is_empty())
    {
        tally.add("propertyType".to_string(), score_property_type(&property, c));
    }

    // No "best of": every point is charged on its own
    let has_legacy = criteria.location.is_some();
    for (index, location) in criteria.all_locations().iter().enumerate() {
        if !is_active(location.weight) {
            continue;
        }
        if let Some(score) = score_location(&property, location) {
            let key = if has_legacy && index == 0 {
                LEGACY_LOCATION_NAME.to_string()
            } else {
                location_key(&location.name, index, &tally.details)
            };
            tally.add(key, score);
        }
    }

    if let Some(c) = criteria.rooms.as_ref().filter(|c| is_active(c.weight)) {
        if let Some(score) = score_rooms(&property, c) {
            tally.add("rooms".to_string(), score);
        }
    }

    ScoredProperty {
        relevance_score: tally.relevance(),
        match_details: tally.details,
        property,
    }
}

/// Score every property and sort by descending relevance
///
/// The sort is stable: equal scores keep their input order. Non-finite
/// scores sort last.
pub fn score_properties(properties: Vec<Property>, criteria: &WeightedCriteria) -> Vec<ScoredProperty> {
    tracing::debug!(
        "Scoring {} properties against {} active criteria",
        properties.len(),
        criteria.active_count()
    );

    let mut scored: Vec<ScoredProperty> = properties
        .into_iter()
        .map(|property| score_property(property, criteria))
        .collect();

    scored.sort_by(|a, b| sort_key(b.relevance_score).total_cmp(&sort_key(a.relevance_score)));

    scored
}

/// Score, sort and optionally truncate to the first `limit` results
pub fn rank(properties: Vec<Property>, criteria: &WeightedCriteria, limit: Option<usize>) -> RankResult {
    let total_candidates = properties.len();
    let mut scored = score_properties(properties, criteria);

    if let Some(limit) = limit {
        scored.truncate(limit);
    }

    RankResult {
        properties: scored,
        total_candidates,
    }
}

/// Round to two decimal places
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[inline]
fn sort_key(score: f64) -> f64 {
    if score.is_finite() { score } else { f64::NEG_INFINITY }
}

/// `location:<name>`, suffixed with the first free number from the point's
/// index up when the key is already taken
fn location_key(name: &str, index: usize, taken: &BTreeMap<String, MatchDetail>) -> String {
    let key = format!("location:{}", name);
    if !taken.contains_key(&key) {
        return key;
    }

    let mut suffix = index;
    loop {
        let candidate = format!("{}:{}", key, suffix);
        if !taken.contains_key(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}
