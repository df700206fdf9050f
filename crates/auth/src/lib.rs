//! `shopfront-auth` — authentication boundary for mutating requests.
//!
//! This crate is intentionally decoupled from HTTP and storage: it knows how to
//! pull an access token out of an `Authorization` header value, how to verify
//! an HS256 JWT, and how to mint one.

pub mod bearer;
pub mod claims;
pub mod jwt;
pub mod principal;
pub mod service;

pub use bearer::{BEARER_PREFIX, bearer_token};
pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use jwt::{Hs256JwtIssuer, Hs256JwtValidator, JwtValidator, TokenIssueError};
pub use principal::PrincipalId;
pub use service::AuthenticationService;
