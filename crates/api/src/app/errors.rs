use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE};
use axum::response::IntoResponse;
use serde_json::json;

use shopfront_auth::TokenValidationError;
use shopfront_core::DomainError;
use shopfront_products::ProductServiceError;

pub fn product_error_to_response(err: ProductServiceError) -> axum::response::Response {
    match err {
        ProductServiceError::NotFound(id) => {
            json_error(StatusCode::NOT_FOUND, "not_found", format!("product {id} not found"))
        }
        ProductServiceError::Repository(e) => {
            tracing::error!(error = %e, "product storage failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", "storage failure")
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
    }
}

pub fn auth_error_to_response(err: &TokenValidationError) -> axum::response::Response {
    let mut response = json_error(StatusCode::UNAUTHORIZED, "unauthorized", err.to_string());
    response
        .headers_mut()
        .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
    response
}

pub fn body_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "invalid_body", rejection.body_text())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
