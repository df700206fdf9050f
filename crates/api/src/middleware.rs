use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use shopfront_auth::{AuthenticationService, TokenValidationError};

use crate::app::errors;
use crate::context::PrincipalContext;

#[derive(Clone)]
pub struct AuthState {
    pub authentication: Arc<AuthenticationService>,
}

/// Require a valid bearer token; on success the request carries a
/// [`PrincipalContext`] extension.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let header = match req.headers().get(AUTHORIZATION) {
        Some(value) => Some(value.to_str().map_err(|_| {
            reject(&TokenValidationError::Malformed(
                "authorization header is not visible ASCII".to_string(),
            ))
        })?),
        None => None,
    };

    let claims = state.authentication.authenticate(header).map_err(|e| reject(&e))?;

    req.extensions_mut().insert(PrincipalContext::from(&claims));

    Ok(next.run(req).await)
}

fn reject(err: &TokenValidationError) -> Response {
    tracing::warn!(reason = %err, "rejected unauthenticated request");
    errors::auth_error_to_response(err)
}
