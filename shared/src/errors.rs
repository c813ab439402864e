//! Unified error types for the ytgate system.

use thiserror::Error;

/// Top-level error type for ytgate.
#[derive(Debug, Error)]
pub enum GateError {
    #[error("Unauthorized: {0}")]
    Unauthorized(AuthFailure),

    #[error("Forbidden: {0}")]
    Forbidden(CapabilityFailure),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Download tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("Tool reported success but {0} is missing")]
    MissingOutput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a bearer credential was rejected. Only used for diagnostics;
/// clients see the same 401 for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthFailure {
    #[error("missing or malformed Authorization header")]
    MissingHeader,

    #[error("invalid token")]
    InvalidToken,
}

/// Why a signed link was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CapabilityFailure {
    #[error("expiry is not an integer")]
    Malformed,

    #[error("signature mismatch")]
    BadSignature,

    #[error("link expired")]
    Expired,
}

/// Errors from invoking the external download tool.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Failed to spawn {binary}: {reason}")]
    SpawnFailed { binary: String, reason: String },

    /// Non-zero exit. `stderr` is relayed to the client unmodified.
    #[error("{stderr}")]
    Exited { code: Option<i32>, stderr: String },

    #[error("Tool timed out after {0}s")]
    Timeout(u64),

    #[error("Tool returned invalid output: {0}")]
    InvalidOutput(String),
}

impl GateError {
    /// The reason shown to clients. Auth and signature failures collapse
    /// their sub-cases so callers learn nothing beyond pass/fail.
    pub fn public_message(&self) -> String {
        match self {
            GateError::Unauthorized(_) => "Missing or invalid credentials".to_string(),
            GateError::Forbidden(_) => "Invalid or expired link".to_string(),
            GateError::NotFound(msg) | GateError::BadRequest(msg) => msg.clone(),
            GateError::Tool(ToolError::Exited { stderr, .. }) => stderr.clone(),
            GateError::Tool(e) => e.to_string(),
            GateError::MissingOutput(_) => "File not found after download".to_string(),
            GateError::Config(_) | GateError::Io(_) => "Internal server error".to_string(),
        }
    }
}

/// Result type alias for ytgate operations.
pub type GateResult<T> = Result<T, GateError>;
