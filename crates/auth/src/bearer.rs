//! `Authorization` header parsing.

use crate::TokenValidationError;

/// Literal, case-sensitive scheme prefix expected on the header value.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Extract the access token from an `Authorization` header value.
///
/// The value must start with [`BEARER_PREFIX`] exactly; anything else is
/// rejected rather than sliced, so a truncated credential never reaches the
/// token parser.
pub fn bearer_token(header: Option<&str>) -> Result<&str, TokenValidationError> {
    let header = header.ok_or(TokenValidationError::MissingCredentials)?;

    let token = header
        .strip_prefix(BEARER_PREFIX)
        .ok_or(TokenValidationError::MissingBearerPrefix)?
        .trim();

    if token.is_empty() {
        return Err(TokenValidationError::MissingCredentials);
    }

    Ok(token)
}
