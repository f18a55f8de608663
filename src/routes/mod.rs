// Route exports
pub mod destinations;
pub mod recommend;

use crate::core::Recommender;
use crate::models::ErrorResponse;
use crate::services::{CatalogError, CatalogStore};
use actix_web::{http::StatusCode, web, HttpResponse};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
    /// Serializes catalog writes; reads go through the recommender's snapshot
    pub catalog: Arc<Mutex<CatalogStore>>,
    pub max_top_k: usize,
}

impl AppState {
    pub fn new(recommender: Recommender, catalog: CatalogStore, max_top_k: usize) -> Self {
        Self {
            recommender: Arc::new(recommender),
            catalog: Arc::new(Mutex::new(catalog)),
            max_top_k,
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(recommend::configure)
            .configure(destinations::configure),
    );
}

pub(crate) fn error_response(
    status: StatusCode,
    error: &str,
    message: impl Into<String>,
) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: message.into(),
        status_code: status.as_u16(),
    })
}

pub(crate) fn catalog_error_response(err: &CatalogError) -> HttpResponse {
    let (status, error) = match err {
        CatalogError::DuplicateId(_) => (StatusCode::CONFLICT, "Duplicate destination"),
        CatalogError::UnknownId(_) => (StatusCode::NOT_FOUND, "Destination not found"),
        CatalogError::Validation(_) => (StatusCode::BAD_REQUEST, "Validation failed"),
        CatalogError::Io(_) | CatalogError::Json(_) => {
            tracing::error!("Catalog update failed: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to update catalog")
        }
    };
    error_response(status, error, err.to_string())
}
