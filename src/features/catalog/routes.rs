use axum::{routing::get, Router};

use crate::features::catalog::handlers;

/// Create public catalog routes
pub fn routes() -> Router {
    Router::new()
        .route("/api/catalog/areas", get(handlers::list_areas))
        .route(
            "/api/catalog/classifications",
            get(handlers::list_classifications),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;

    #[tokio::test]
    async fn test_list_areas_returns_every_entry() {
        let server = TestServer::new(routes()).unwrap();

        let response = server.get("/api/catalog/areas").await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], true);
        let entries = body["data"].as_array().unwrap();
        assert_eq!(entries.len(), 6);
        assert!(entries.iter().any(|e| e["slug"] == "maintenance"));
    }

    #[tokio::test]
    async fn test_list_classifications_returns_every_entry() {
        let server = TestServer::new(routes()).unwrap();

        let response = server.get("/api/catalog/classifications").await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        let entries = body["data"].as_array().unwrap();
        assert_eq!(entries.len(), 6);
        assert!(entries.iter().any(|e| e["slug"] == "guest_complaint"));
    }
}
