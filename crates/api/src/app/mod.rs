//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: storage selection and the shared `AppServices`
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `errors.rs`: consistent JSON error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use shopfront_auth::AuthenticationService;
use shopfront_products::RepositoryError;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowHeaders, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ApiConfig;
use crate::middleware::AuthState;

pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router from configuration (entrypoint used by `main.rs`).
pub async fn build_app(config: &ApiConfig) -> Result<Router, RepositoryError> {
    let services = services::build_services(config).await?;
    let authentication = AuthenticationService::hs256(config.jwt_secret.as_bytes());
    Ok(build_router(Arc::new(services), Arc::new(authentication)))
}

/// Assemble the router around already-built collaborators.
pub fn build_router(
    services: Arc<services::AppServices>,
    authentication: Arc<AuthenticationService>,
) -> Router {
    let auth_state = AuthState { authentication };

    // `Access-Control-Allow-Headers: *` never covers `Authorization`, so
    // echo the requested headers back instead.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(AllowHeaders::mirror_request());

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router(auth_state))
        .layer(Extension(services))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}
