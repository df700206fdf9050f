use axum::Router;

use crate::middleware::AuthState;

pub mod common;
pub mod products;
pub mod system;

/// Router for all resource endpoints.
pub fn router(auth: AuthState) -> Router {
    Router::new().nest("/products", products::router(auth))
}
