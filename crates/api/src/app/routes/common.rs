use axum::{Json, extract::rejection::JsonRejection, response::Response};

use shopfront_core::ProductId;
use shopfront_products::{ProductAttributes, ProductData};

use crate::app::errors;

/// Parse a `{id}` path segment.
pub fn parse_product_id(raw: &str) -> Result<ProductId, Response> {
    raw.parse().map_err(errors::domain_error_to_response)
}

/// Decode and validate a product body before any service call.
pub fn validated_body(
    body: Result<Json<ProductData>, JsonRejection>,
) -> Result<ProductAttributes, Response> {
    let Json(data) = body.map_err(errors::body_rejection_to_response)?;
    data.validate().map_err(errors::domain_error_to_response)
}
