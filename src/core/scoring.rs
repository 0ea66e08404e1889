use crate::core::distance::haversine_distance;
use crate::models::{
    CriterionDetail, LocationCriterion, MatchDetail, Property, PropertyTypeCriterion, RoomCheck,
    RoomsCriterion, ValueCriterion, WeightCriterion,
};

/// Surplus bonus per extra bedroom
const BEDROOM_STEP: f64 = 0.1;
/// Surplus bonus per extra bathroom
const BATHROOM_STEP: f64 = 0.2;

/// Result of scoring one property against one criterion
///
/// `max_achievable` is charged to the denominator whatever `matched` says.
#[derive(Debug, Clone, PartialEq)]
pub struct CriterionScore {
    pub achieved: f64,
    pub max_achievable: f64,
    pub matched: bool,
    pub detail: CriterionDetail,
}

impl CriterionScore {
    fn new(achieved: f64, weight: f64, matched: bool, detail: CriterionDetail) -> Self {
        Self {
            achieved,
            max_achievable: weight,
            matched,
            detail,
        }
    }

    fn all_or_nothing(matched: bool, weight: f64, detail: CriterionDetail) -> Self {
        let achieved = if matched { weight } else { 0.0 };
        Self::new(achieved, weight, matched, detail)
    }

    pub fn into_match_detail(self) -> MatchDetail {
        MatchDetail {
            matched: self.matched,
            contribution: self.achieved,
            detail: self.detail,
        }
    }
}

/// Score the listing price against a budget ceiling
///
/// Under budget earns 50% of the weight at the bound, rising linearly to
/// 100% as the price approaches zero. Over budget decays from 30% to 0% as
/// the overage reaches the full bound.
pub fn score_max_price(property: &Property, criterion: &ValueCriterion<f64>) -> CriterionScore {
    let (achieved, matched) = upper_bound_credit(property.price, criterion.value, criterion.weight);
    CriterionScore::new(achieved, criterion.weight, matched, CriterionDetail::Price)
}

/// Score bedrooms against a minimum, +10% per surplus bedroom from an 80% base
pub fn score_min_bedrooms(property: &Property, criterion: &ValueCriterion<f64>) -> CriterionScore {
    let (achieved, matched) = lower_bound_credit(
        f64::from(property.bedrooms),
        criterion.value,
        criterion.weight,
        BEDROOM_STEP,
    );
    CriterionScore::new(achieved, criterion.weight, matched, CriterionDetail::Bedrooms)
}

/// Score bathrooms against a minimum, +20% per surplus bathroom from an 80% base
pub fn score_min_bathrooms(property: &Property, criterion: &ValueCriterion<f64>) -> CriterionScore {
    let (achieved, matched) = lower_bound_credit(
        f64::from(property.bathrooms),
        criterion.value,
        criterion.weight,
        BATHROOM_STEP,
    );
    CriterionScore::new(achieved, criterion.weight, matched, CriterionDetail::Bathrooms)
}

pub fn score_garden(property: &Property, criterion: &WeightCriterion) -> CriterionScore {
    CriterionScore::all_or_nothing(property.has_garden, criterion.weight, CriterionDetail::Garden)
}

/// Matches when the listing's student flag equals the desired one
pub fn score_student(property: &Property, criterion: &ValueCriterion<bool>) -> CriterionScore {
    CriterionScore::all_or_nothing(
        property.is_student == criterion.value,
        criterion.weight,
        CriterionDetail::Student,
    )
}

/// Case-insensitive substring match of the listing type against any requested type
pub fn score_property_type(property: &Property, criterion: &PropertyTypeCriterion) -> CriterionScore {
    let listing_type = property.property_type.to_lowercase();
    let matched = criterion
        .values
        .iter()
        .any(|wanted| listing_type.contains(&wanted.to_lowercase()));

    CriterionScore::all_or_nothing(matched, criterion.weight, CriterionDetail::PropertyType)
}

/// Score proximity to one named point
///
/// Returns `None` when the listing has no coordinates.
pub fn score_location(property: &Property, criterion: &LocationCriterion) -> Option<CriterionScore> {
    let (lat, lon) = property.coordinates()?;
    let distance = haversine_distance(criterion.lat, criterion.lng, lat, lon);
    let (achieved, matched) = upper_bound_credit(distance, criterion.max_distance, criterion.weight);

    Some(CriterionScore::new(
        achieved,
        criterion.weight,
        matched,
        CriterionDetail::Location {
            name: criterion.name.clone(),
            distance,
        },
    ))
}

/// Score the room bundle as the mean of its present sub-checks
///
/// Returns `None` when the listing has no room details or no sub-check is
/// requested.
pub fn score_rooms(property: &Property, criterion: &RoomsCriterion) -> Option<CriterionScore> {
    let rooms = property.room_details.as_ref()?;
    let wanted = &criterion.criteria;

    let mut checks = Vec::with_capacity(4);
    if let Some(required) = wanted.min_double_rooms {
        checks.push(room_check("minDoubleRooms", count_ratio(rooms.double_rooms, required)));
    }
    if let Some(required) = wanted.min_ensuite_rooms {
        checks.push(room_check("minEnsuiteRooms", count_ratio(rooms.ensuite_rooms, required)));
    }
    if let Some(target) = wanted.similar_sized_rooms {
        checks.push(room_check("similarSizedRooms", flag_ratio(rooms.similar_sized_rooms, target)));
    }
    if let Some(target) = wanted.has_master_bedroom {
        checks.push(room_check("hasMasterBedroom", flag_ratio(rooms.has_master_bedroom, target)));
    }

    if checks.is_empty() {
        return None;
    }

    let mean = checks.iter().map(|c| c.score).sum::<f64>() / checks.len() as f64;
    let matched = checks.iter().all(|c| c.score >= 1.0);

    Some(CriterionScore::new(
        criterion.weight * mean,
        criterion.weight,
        matched,
        CriterionDetail::Rooms { checks },
    ))
}

/// Shared curve for "at most `bound`" criteria (price, distance)
#[inline]
fn upper_bound_credit(value: f64, bound: f64, weight: f64) -> (f64, bool) {
    if value <= bound {
        let headroom = 1.0 - value / bound;
        (weight * (0.5 + headroom * 0.5), true)
    } else {
        let over_ratio = ((value - bound) / bound).min(1.0);
        (weight * (0.3 * (1.0 - over_ratio)), false)
    }
}

/// Shared curve for "at least `minimum`" counts
#[inline]
fn lower_bound_credit(value: f64, minimum: f64, weight: f64, step: f64) -> (f64, bool) {
    if value >= minimum {
        let extra = value - minimum;
        (weight * (0.8 + extra * step).min(1.0), true)
    } else {
        (weight * (value / minimum) * 0.4, false)
    }
}

#[inline]
fn count_ratio(actual: u32, required: f64) -> f64 {
    let actual = f64::from(actual);
    if actual >= required {
        1.0
    } else {
        (actual / required).min(1.0)
    }
}

#[inline]
fn flag_ratio(actual: bool, target: bool) -> f64 {
    if actual == target { 1.0 } else { 0.0 }
}

fn room_check(check: &str, score: f64) -> RoomCheck {
    RoomCheck {
        check: check.to_string(),
        score,
    }
}
