//! Access decision for the file-serving endpoint.
//!
//! A request either carries a signed link (`exp` + `sig`) or falls back to a
//! bearer header. The mode is chosen once from which parameters are present;
//! a signed link wins even when a bearer header is also sent, and a failed
//! link never falls through to the bearer check.

use crate::capability::{unix_now, UrlVerifier};
use crate::errors::GateResult;
use crate::token_auth::BearerAuth;

/// How a file request proves it may read the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessRequest {
    Capability { exp: String, sig: String },
    Bearer { authorization: Option<String> },
}

impl AccessRequest {
    /// Pick the mode from the request's query parameters and header.
    pub fn classify(
        exp: Option<String>,
        sig: Option<String>,
        authorization: Option<String>,
    ) -> Self {
        match (exp, sig) {
            (Some(exp), Some(sig)) => AccessRequest::Capability { exp, sig },
            _ => AccessRequest::Bearer { authorization },
        }
    }

    pub fn mode(&self) -> &'static str {
        match self {
            AccessRequest::Capability { .. } => "signed-link",
            AccessRequest::Bearer { .. } => "bearer",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AccessGateway {
    bearer: BearerAuth,
    verifier: UrlVerifier,
}

impl AccessGateway {
    pub fn new(bearer: BearerAuth, verifier: UrlVerifier) -> Self {
        Self { bearer, verifier }
    }

    /// Bearer check used on its own by the trusted endpoints.
    pub fn bearer(&self) -> &BearerAuth {
        &self.bearer
    }

    pub fn authorize_at(&self, filename: &str, request: &AccessRequest, now: i64) -> GateResult<()> {
        match request {
            AccessRequest::Capability { exp, sig } => self.verifier.verify_at(filename, exp, sig, now),
            AccessRequest::Bearer { authorization } => self.bearer.check(authorization.as_deref()),
        }
    }

    pub fn authorize(&self, filename: &str, request: &AccessRequest) -> GateResult<()> {
        self.authorize_at(filename, request, unix_now())
    }
}
