use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::ranker;
use crate::models::{
    HealthResponse, InsertPropertiesRequest, InsertResponse, MessageResponse, PropertiesResponse,
    PropertyQuery, ScoreRequest, WeightedCriteria,
};
use crate::routes::error::ApiError;
use crate::services::PropertyStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PropertyStore>,
    /// Applied when a request does not name a limit; `None` returns everything
    pub default_limit: Option<usize>,
    pub max_limit: usize,
}

impl AppState {
    pub fn new(store: Arc<PropertyStore>) -> Self {
        Self {
            store,
            default_limit: None,
            max_limit: 1000,
        }
    }

    fn limit(&self, requested: Option<u16>) -> Option<usize> {
        requested
            .map(usize::from)
            .or(self.default_limit)
            .map(|limit| limit.min(self.max_limit))
    }
}

/// Configure all property-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/properties", web::get().to(list_properties))
        .route("/properties", web::post().to(insert_properties))
        .route("/properties", web::delete().to(clear_properties))
        .route("/properties/score", web::post().to(score_properties))
        .route("/properties/stats", web::get().to(property_stats));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// List stored properties, ranked when filters are supplied
///
/// GET /api/v1/properties?filters={json}&limit=20
async fn list_properties(
    state: web::Data<AppState>,
    query: web::Query<PropertyQuery>,
) -> Result<HttpResponse, ApiError> {
    query.validate()?;
    let limit = state.limit(query.limit);
    let properties = state.store.all().await;

    let Some(raw_filters) = query.filters.as_deref() else {
        let properties: Vec<_> = properties.into_iter().take(limit.unwrap_or(usize::MAX)).collect();
        return Ok(HttpResponse::Ok().json(PropertiesResponse {
            count: properties.len(),
            properties,
            total_candidates: None,
        }));
    };

    let criteria: WeightedCriteria = serde_json::from_str(raw_filters).map_err(|e| {
        tracing::warn!("Rejected malformed filters: {}", e);
        ApiError::from(e)
    })?;

    let result = ranker::rank(properties, &criteria, limit);

    tracing::info!(
        "Ranked {} stored properties, returning {}",
        result.total_candidates,
        result.properties.len()
    );

    Ok(HttpResponse::Ok().json(PropertiesResponse {
        count: result.properties.len(),
        properties: result.properties,
        total_candidates: Some(result.total_candidates),
    }))
}

/// Score the supplied records without touching the store
///
/// POST /api/v1/properties/score
///
/// Request body:
/// ```json
/// {
///   "properties": [{ "id": "p1", "price": 950, ... }],
///   "criteria": { "maxPrice": { "value": 1200, "weight": 5 } },
///   "limit": 20
/// }
/// ```
async fn score_properties(
    state: web::Data<AppState>,
    req: web::Json<ScoreRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;
    let limit = state.limit(req.limit);
    let ScoreRequest { properties, criteria, .. } = req.into_inner();

    let result = ranker::rank(properties, &criteria, limit);

    tracing::info!(
        "Scored {} submitted properties, returning {}",
        result.total_candidates,
        result.properties.len()
    );

    Ok(HttpResponse::Ok().json(PropertiesResponse {
        count: result.properties.len(),
        properties: result.properties,
        total_candidates: Some(result.total_candidates),
    }))
}

/// Upsert properties into the store
///
/// POST /api/v1/properties
async fn insert_properties(
    state: web::Data<AppState>,
    req: web::Json<InsertPropertiesRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let inserted = state.store.upsert_many(req.into_inner().properties).await;
    let total = state.store.len().await;

    tracing::info!("Stored {} properties ({} total)", inserted, total);

    Ok(HttpResponse::Ok().json(InsertResponse { inserted, total }))
}

/// DELETE /api/v1/properties
async fn clear_properties(state: web::Data<AppState>) -> impl Responder {
    state.store.clear().await;
    tracing::info!("Cleared all stored properties");

    HttpResponse::Ok().json(MessageResponse {
        message: "All properties cleared successfully".to_string(),
    })
}

/// GET /api/v1/properties/stats
async fn property_stats(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.store.stats().await)
}
