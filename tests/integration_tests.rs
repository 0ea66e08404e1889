// Integration tests for Rental Ranker

use actix_web::{http::StatusCode, test, web, App};
use rental_ranker::core::rank;
use rental_ranker::models::{
    LocationCriterion, Property, PropertyTypeCriterion, ValueCriterion, WeightCriterion,
    WeightedCriteria,
};
use rental_ranker::routes::{self, AppState};
use rental_ranker::services::PropertyStore;
use serde_json::{json, Value};
use std::sync::Arc;

fn create_test_property(id: &str, price: f64, bedrooms: u32, property_type: &str, lat: f64, lon: f64) -> Property {
    Property {
        id: id.to_string(),
        title: format!("{} bed {}", bedrooms, property_type),
        price,
        price_qualifier: Some("pcm".to_string()),
        bedrooms,
        bathrooms: 1,
        property_type: property_type.to_string(),
        address: "Nottingham".to_string(),
        latitude: Some(lat),
        longitude: Some(lon),
        url: format!("https://example.com/properties/{}", id),
        ..Default::default()
    }
}

fn create_listings() -> Vec<Property> {
    vec![
        create_test_property("1", 650.0, 1, "Studio Flat", 52.9548, -1.1581),
        create_test_property("2", 950.0, 2, "Flat", 52.9400, -1.1900),
        create_test_property("3", 1400.0, 3, "Semi-Detached House", 52.9700, -1.2200),
        create_test_property("4", 2100.0, 4, "Detached House", 53.0500, -1.3000),
        create_test_property("5", 800.0, 2, "Maisonette", 52.9300, -1.1300),
    ]
}

fn create_criteria() -> WeightedCriteria {
    WeightedCriteria {
        max_price: Some(ValueCriterion { value: 1200.0, weight: 5.0 }),
        min_bedrooms: Some(ValueCriterion { value: 2.0, weight: 4.0 }),
        has_garden: Some(WeightCriterion { weight: 1.0 }),
        property_type: Some(PropertyTypeCriterion {
            values: vec!["flat".to_string()],
            weight: 2.0,
        }),
        locations: vec![LocationCriterion {
            name: "city".to_string(),
            lat: 52.9548,
            lng: -1.1581,
            max_distance: 3.0,
            weight: 3.0,
        }],
        ..Default::default()
    }
}

fn app_state(properties: Vec<Property>) -> AppState {
    AppState::new(Arc::new(PropertyStore::with_properties(properties)))
}

#[std::prelude::v1::test]
fn test_full_ranking_flow() {
    let result = rank(create_listings(), &create_criteria(), Some(3));

    assert_eq!(result.total_candidates, 5);
    assert_eq!(result.properties.len(), 3);
    // Two bed flat close to the city centre and under budget wins
    assert_eq!(result.properties[0].property.id, "2");

    for pair in result.properties.windows(2) {
        assert!(
            pair[0].relevance_score >= pair[1].relevance_score,
            "Properties not sorted by score"
        );
    }

    for scored in &result.properties {
        assert!(
            scored.relevance_score >= 0.0 && scored.relevance_score <= 100.0,
            "Score {} is out of range [0, 100]",
            scored.relevance_score
        );
    }
}

#[std::prelude::v1::test]
fn test_over_budget_listing_is_kept() {
    let result = rank(create_listings(), &create_criteria(), None);

    assert_eq!(result.properties.len(), 5);
    let pricey = result
        .properties
        .iter()
        .find(|s| s.property.id == "4")
        .unwrap();
    assert!(!pricey.match_details["price"].matched);
    assert!(pricey.relevance_score > 0.0);
}

#[actix_web::test]
async fn test_health_endpoint() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state(vec![])))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[actix_web::test]
async fn test_list_without_filters_returns_all() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state(create_listings())))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1/properties").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["count"], 5);
    assert_eq!(body["properties"][0]["id"], "1");
    assert!(body["properties"][0].get("relevanceScore").is_none());
}

#[actix_web::test]
async fn test_list_with_filters_ranks() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state(create_listings())))
            .configure(routes::configure_routes),
    )
    .await;

    let filters = serde_json::to_string(&json!({
        "maxPrice": {"value": 1000, "weight": 5},
        "propertyType": {"values": ["house"], "weight": 5}
    }))
    .unwrap();
    let uri = format!(
        "/api/v1/properties?limit=2&filters={}",
        urlencoding::encode(&filters)
    );

    let req = test::TestRequest::get().uri(&uri).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["count"], 2);
    assert_eq!(body["totalCandidates"], 5);
    let first = &body["properties"][0];
    assert!(first["relevanceScore"].as_f64().unwrap() > 0.0);
    assert_eq!(first["matchDetails"]["price"]["criterion"], "price");
    assert_eq!(first["matchDetails"]["propertyType"]["criterion"], "propertyType");
}

#[actix_web::test]
async fn test_malformed_filters_rejected() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state(create_listings())))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/v1/properties?filters=%7Bnot-json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_filters");
    assert_eq!(body["statusCode"], 400);
}

#[actix_web::test]
async fn test_limit_out_of_range_rejected() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state(create_listings())))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1/properties?limit=0").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_score_endpoint_ranks_submitted_records() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state(vec![])))
            .configure(routes::configure_routes),
    )
    .await;

    let payload = json!({
        "properties": [
            {"id": "a", "title": "Flat", "price": 1000, "bedrooms": 2, "bathrooms": 1,
             "propertyType": "Flat", "hasGarden": true},
            {"id": "b", "title": "House", "price": 2000, "bedrooms": 1, "bathrooms": 1,
             "propertyType": "House", "hasGarden": false}
        ],
        "criteria": {
            "maxPrice": {"value": 1500, "weight": 5},
            "minBedrooms": {"value": 2, "weight": 5},
            "hasGarden": {"weight": 3}
        }
    });

    let req = test::TestRequest::post()
        .uri("/api/v1/properties/score")
        .set_json(&payload)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["count"], 2);
    assert_eq!(body["properties"][0]["id"], "a");
    assert_eq!(body["properties"][0]["relevanceScore"], 79.49);
    assert_eq!(body["properties"][1]["matchDetails"]["hasGarden"]["matched"], false);
}

#[actix_web::test]
async fn test_invalid_json_body_rejected() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state(vec![])))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/properties/score")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"properties\": 12")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_json");
}

#[actix_web::test]
async fn test_insert_stats_and_clear() {
    let store = Arc::new(PropertyStore::new());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(AppState::new(store.clone())))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/properties")
        .set_json(json!({ "properties": create_listings() }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["inserted"], 5);
    assert_eq!(body["total"], 5);

    let req = test::TestRequest::get().uri("/api/v1/properties/stats").to_request();
    let stats: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(stats["total"], 5);
    assert_eq!(stats["averagePrice"], 1180.0);
    assert_eq!(stats["bedroomDistribution"]["2"], 2);
    assert_eq!(stats["propertyTypes"]["Flat"], 1);

    let req = test::TestRequest::delete().uri("/api/v1/properties").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    assert!(store.is_empty().await);
}
