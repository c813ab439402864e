//! Wire models for the ytgate HTTP API.

use serde::{Deserialize, Serialize};

use crate::capability::DEFAULT_EXPIRES_IN;

pub const DEFAULT_FORMAT: &str = "best";

fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}

fn default_expires_in() -> i64 {
    DEFAULT_EXPIRES_IN
}

/// `GET /info`
#[derive(Debug, Clone, Deserialize)]
pub struct InfoQuery {
    pub url: String,
}

/// `GET /direct-url`
#[derive(Debug, Clone, Deserialize)]
pub struct DirectUrlQuery {
    pub url: String,
    #[serde(default = "default_format")]
    pub format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectUrlResponse {
    pub direct_url: String,
}

/// `POST /download`
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadRequest {
    pub url: String,
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default)]
    pub filename: Option<String>,
}

/// Outcome of a finished server-side download.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DownloadStatus {
    Success,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadResponse {
    pub status: DownloadStatus,
    pub filename: String,
    pub path: String,
}

/// `GET /download-file`
#[derive(Debug, Clone, Deserialize)]
pub struct FileQuery {
    pub filename: String,
    pub exp: Option<String>,
    pub sig: Option<String>,
}

/// `POST /download-signed`
#[derive(Debug, Clone, Deserialize)]
pub struct SignRequest {
    pub filename: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignResponse {
    pub url: String,
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}
