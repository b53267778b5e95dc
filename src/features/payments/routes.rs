use axum::{routing::get, routing::post, Router};
use std::sync::Arc;

use crate::features::payments::handlers;
use crate::features::payments::services::PaymentService;

/// Create routes for the payments feature
pub fn routes(payment_service: Arc<PaymentService>) -> Router {
    Router::new()
        .route(
            "/api/payments",
            post(handlers::create_payment).get(handlers::list_payments),
        )
        .route("/api/payments/{id}", get(handlers::get_payment))
        .with_state(payment_service)
}
