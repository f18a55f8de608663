use super::{error_response, AppState};
use crate::core::RecommendError;
use crate::models::{ExplainParams, HealthResponse, RecommendRequest};
use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;

/// Configure recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/recommend", web::post().to(recommend))
        .route("/destinations/{id}/explain", web::get().to(explain));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let destinations = state.recommender.len();
    let status = if destinations > 0 { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        destinations,
        timestamp: chrono::Utc::now(),
    })
}

/// Recommend destinations for a free-text query
///
/// POST /api/v1/recommend
///
/// Request body:
/// ```json
/// {
///   "query": "cheap beach trip for 3 days",
///   "top_k": 5
/// }
/// ```
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    if req.query.trim().is_empty() {
        let message = "query must not be empty";
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", message);
    }
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommend request: field_errors={:?}", errors);
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    // Cap to keep responses bounded; non-positive values fall through to the default
    let top_k = req.top_k.unwrap_or(0).min(state.max_top_k as i64);

    match state.recommender.recommend(req.query.trim(), top_k) {
        Ok(response) => {
            tracing::debug!("Parsed constraints: {:?}", response.parsed_constraints);
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            tracing::error!("Recommendation failed for {:?}: {}", req.query, e);
            let status = StatusCode::INTERNAL_SERVER_ERROR;
            error_response(status, "Recommendation failed", e.to_string())
        }
    }
}

/// Score breakdown of one destination
///
/// GET /api/v1/destinations/{id}/explain?query=...
async fn explain(
    state: web::Data<AppState>,
    path: web::Path<u32>,
    params: web::Query<ExplainParams>,
) -> impl Responder {
    let id = path.into_inner();

    match state.recommender.explain(params.query.trim(), id) {
        Ok(explanation) => HttpResponse::Ok().json(explanation),
        Err(e @ RecommendError::UnknownDestination(_)) => {
            error_response(StatusCode::NOT_FOUND, "Destination not found", e.to_string())
        }
        Err(e) => {
            tracing::error!("Explain failed for destination {}: {}", id, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Explain failed", e.to_string())
        }
    }
}
