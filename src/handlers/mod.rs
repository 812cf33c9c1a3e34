pub mod accounts;
pub mod deals;
pub mod organizations;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{delete, get, post, put},
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::db::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        // Organizations
        .route("/api/organizations", get(organizations::list_organizations))
        .route("/api/organizations", post(organizations::create_organization))
        .route("/api/organizations/{id}", get(organizations::get_organization))
        .route("/api/organizations/{id}", put(organizations::update_organization))
        .route("/api/organizations/{id}", delete(organizations::delete_organization))
        // Accounts
        .route("/api/accounts", get(accounts::list_accounts))
        .route("/api/accounts", post(accounts::create_account))
        .route("/api/accounts/{id}", get(accounts::get_account))
        // Deals
        .route("/api/deals", get(deals::list_deals))
        .route("/api/deals", post(deals::create_deal))
        .route("/api/deals/{id}", get(deals::get_deal))
        .route("/api/deals/organization/{id}", get(deals::list_deals_for_organization))
}

async fn health() -> &'static str {
    "ok"
}

/// CORS for the browser client. An empty origin list allows any origin.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    if allowed_origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    cors.allow_origin(AllowOrigin::list(origins))
}
