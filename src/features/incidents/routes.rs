use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::incidents::handlers;
use crate::features::incidents::services::IncidentService;

/// Create routes for the incidents feature
pub fn routes(incident_service: Arc<IncidentService>) -> Router {
    Router::new()
        .route(
            "/api/incidents",
            post(handlers::create_incident).get(handlers::list_incidents),
        )
        .route("/api/incidents/{id}", get(handlers::get_incident))
        .route(
            "/api/incidents/{id}/review",
            post(handlers::review_incident),
        )
        .with_state(incident_service)
}
