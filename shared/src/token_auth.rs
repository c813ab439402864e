//! Static bearer-token authentication for trusted endpoints.

use subtle::ConstantTimeEq;
use tracing::warn;

use crate::config::ApiToken;
use crate::errors::{AuthFailure, GateError, GateResult};

const BEARER_PREFIX: &str = "Bearer ";

/// Checks `Authorization: Bearer <token>` against the configured token.
#[derive(Debug, Clone)]
pub struct BearerAuth {
    token: ApiToken,
}

impl BearerAuth {
    pub fn new(token: ApiToken) -> Self {
        Self { token }
    }

    /// Validate the raw `Authorization` header value, if any.
    pub fn check(&self, header: Option<&str>) -> GateResult<()> {
        let result = self.classify(header);
        if let Err(reason) = result {
            warn!("Bearer auth rejected: {}", reason);
            return Err(GateError::Unauthorized(reason));
        }
        Ok(())
    }

    fn classify(&self, header: Option<&str>) -> Result<(), AuthFailure> {
        let presented = header
            .and_then(|h| h.strip_prefix(BEARER_PREFIX))
            .ok_or(AuthFailure::MissingHeader)?;

        let matches: bool = presented.as_bytes().ct_eq(self.token.as_str().as_bytes()).into();
        if !matches {
            return Err(AuthFailure::InvalidToken);
        }
        Ok(())
    }
}
