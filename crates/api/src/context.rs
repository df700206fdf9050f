use shopfront_auth::{JwtClaims, PrincipalId};

/// Principal context for a request (authenticated identity).
///
/// Inserted into request extensions by the auth middleware; only present on
/// routes that require a bearer token.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    principal_id: PrincipalId,
}

impl PrincipalContext {
    pub fn new(principal_id: PrincipalId) -> Self {
        Self { principal_id }
    }

    pub fn principal_id(&self) -> PrincipalId {
        self.principal_id
    }
}

impl From<&JwtClaims> for PrincipalContext {
    fn from(claims: &JwtClaims) -> Self {
        Self::new(claims.sub)
    }
}
