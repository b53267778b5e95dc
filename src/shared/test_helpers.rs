#[cfg(test)]
use crate::features::auth::model::AuthenticatedUser;

#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};

#[cfg(test)]
pub fn create_admin_user() -> AuthenticatedUser {
    AuthenticatedUser {
        account_id: "test-account-id".to_string(),
        sub: "test-sub".to_string(),
        roles: vec!["admin".to_string()],
    }
}

#[cfg(test)]
pub fn create_reporter_user() -> AuthenticatedUser {
    AuthenticatedUser {
        account_id: "reporter-account-id".to_string(),
        sub: "reporter-sub".to_string(),
        roles: vec!["reporter".to_string()],
    }
}

#[cfg(test)]
async fn inject_admin_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_admin_user());
    next.run(request).await
}

#[cfg(test)]
pub fn with_admin_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_admin_middleware))
}
