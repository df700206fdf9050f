use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{Hs256JwtValidator, JwtClaims, JwtValidator, TokenValidationError, bearer_token};

/// Authentication entrypoint used by the HTTP layer.
///
/// Wraps a [`JwtValidator`] so callers can swap the verification scheme
/// without touching request handling.
#[derive(Clone)]
pub struct AuthenticationService {
    validator: Arc<dyn JwtValidator>,
}

impl AuthenticationService {
    pub fn new(validator: Arc<dyn JwtValidator>) -> Self {
        Self { validator }
    }

    /// Service backed by an HS256 shared secret.
    pub fn hs256(secret: impl AsRef<[u8]>) -> Self {
        Self::new(Arc::new(Hs256JwtValidator::new(secret)))
    }

    /// Parse and verify a raw access token against the current clock.
    pub fn parse_token(&self, token: &str) -> Result<JwtClaims, TokenValidationError> {
        self.parse_token_at(token, Utc::now())
    }

    pub fn parse_token_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<JwtClaims, TokenValidationError> {
        self.validator.validate(token, now)
    }

    /// Authenticate an `Authorization` header value (bearer extraction + parse).
    pub fn authenticate(&self, header: Option<&str>) -> Result<JwtClaims, TokenValidationError> {
        let token = bearer_token(header)?;
        let claims = self.parse_token(token)?;
        tracing::debug!(principal = %claims.sub, "access token accepted");
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::{Hs256JwtIssuer, PrincipalId};

    const SECRET: &str = "service-secret";

    fn fresh_token(sub: PrincipalId) -> String {
        Hs256JwtIssuer::new(SECRET, Duration::minutes(5))
            .unwrap()
            .issue(sub, Utc::now())
            .unwrap()
    }

    #[test]
    fn authenticates_bearer_header() {
        let sub = PrincipalId::new();
        let header = format!("Bearer {}", fresh_token(sub));

        let claims = AuthenticationService::hs256(SECRET)
            .authenticate(Some(&header))
            .unwrap();
        assert_eq!(claims.sub, sub);
    }

    #[test]
    fn header_without_prefix_is_rejected_even_with_valid_token() {
        let token = fresh_token(PrincipalId::new());

        let err = AuthenticationService::hs256(SECRET)
            .authenticate(Some(&token))
            .unwrap_err();
        assert_eq!(err, TokenValidationError::MissingBearerPrefix);
    }

    #[test]
    fn parse_token_rejects_malformed_token() {
        let err = AuthenticationService::hs256(SECRET)
            .parse_token("not-a-jwt")
            .unwrap_err();
        assert!(matches!(err, TokenValidationError::Malformed(_)));
    }

    struct RejectAll;

    impl JwtValidator for RejectAll {
        fn validate(&self, _token: &str, _now: DateTime<Utc>) -> Result<JwtClaims, TokenValidationError> {
            Err(TokenValidationError::Expired)
        }
    }

    #[test]
    fn delegates_to_custom_validator() {
        let service = AuthenticationService::new(Arc::new(RejectAll));
        assert_eq!(
            service.authenticate(Some("Bearer anything")),
            Err(TokenValidationError::Expired)
        );
    }
}
