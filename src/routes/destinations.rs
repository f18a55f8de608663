use super::{catalog_error_response, AppState};
use crate::models::{
    AddDestinationRequest, CatalogUpdateResponse, DestinationView, DestinationsResponse,
};
use actix_web::{web, HttpResponse, Responder};

/// Configure catalog routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/destinations", web::get().to(list_destinations))
        .route("/destinations", web::post().to(add_destination))
        .route("/destinations/{id}", web::delete().to(remove_destination));
}

/// List the current catalog
///
/// GET /api/v1/destinations
async fn list_destinations(state: web::Data<AppState>) -> impl Responder {
    let snapshot = state.recommender.snapshot();
    let destinations: Vec<DestinationView> =
        snapshot.destinations().map(DestinationView::from).collect();

    HttpResponse::Ok().json(DestinationsResponse {
        total: destinations.len(),
        destinations,
    })
}

/// Add a destination, persist the catalog and rebuild the index
///
/// POST /api/v1/destinations
///
/// Request body:
/// ```json
/// {
///   "name": "Coorg Coffee Hills",
///   "mood": ["nature", "relaxing"],
///   "budget_min": 2500,
///   "budget_max": 5000,
///   "duration_days": 3,
///   "distance_km": 350,
///   "rating": 4.4
/// }
/// ```
async fn add_destination(
    state: web::Data<AppState>,
    req: web::Json<AddDestinationRequest>,
) -> impl Responder {
    let mut catalog = state.catalog.lock().await;

    let added = match catalog.add(req.into_inner()) {
        Ok(destination) => destination,
        Err(e) => {
            tracing::info!("Rejected new destination: {}", e);
            return catalog_error_response(&e);
        }
    };

    state.recommender.rebuild(catalog.destinations().to_vec());

    HttpResponse::Created().json(CatalogUpdateResponse {
        success: true,
        id: added.id,
        total: catalog.len(),
    })
}

/// Remove a destination, persist the catalog and rebuild the index
///
/// DELETE /api/v1/destinations/{id}
async fn remove_destination(state: web::Data<AppState>, path: web::Path<u32>) -> impl Responder {
    let id = path.into_inner();
    let mut catalog = state.catalog.lock().await;

    if let Err(e) = catalog.remove(id) {
        return catalog_error_response(&e);
    }

    state.recommender.rebuild(catalog.destinations().to_vec());

    HttpResponse::Ok().json(CatalogUpdateResponse {
        success: true,
        id,
        total: catalog.len(),
    })
}
