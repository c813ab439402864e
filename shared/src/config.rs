//! Process-wide configuration, read once at startup.
//!
//! Values come from the environment (optionally seeded from a `.env` file by
//! the binary). Nothing here is mutated after startup; components receive the
//! pieces they need through their constructors.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::errors::{GateError, GateResult};

pub const DEFAULT_API_TOKEN: &str = "supersecrettoken123";
pub const DEFAULT_SIGN_SECRET: &str = "supersecretkey";
pub const DEFAULT_DOWNLOAD_DIR: &str = "/tmp/videos";
pub const DEFAULT_COOKIES_PATH: &str = "/app/cookies.txt";
pub const DEFAULT_YTDLP_BIN: &str = "yt-dlp";
pub const DEFAULT_YTDLP_TIMEOUT_SECS: u64 = 600;
pub const DEFAULT_API_HOST: &str = "0.0.0.0";
pub const DEFAULT_API_PORT: u16 = 8000;

/// Shared bearer credential for trusted callers.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken([redacted])")
    }
}

/// HMAC key for signed download links. Never leaves the process.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self(key.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey([redacted])")
    }
}

#[derive(Debug, Clone)]
pub struct GateConfig {
    pub api_token: ApiToken,
    pub signing_key: SigningKey,
    pub download_dir: PathBuf,
    pub cookies_path: PathBuf,
    pub ytdlp_bin: String,
    pub ytdlp_timeout_secs: u64,
    pub api_host: String,
    pub api_port: u16,
}

impl GateConfig {
    /// Build the config from the process environment.
    pub fn from_env() -> GateResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup. Missing keys fall back
    /// to defaults; present-but-unparseable numbers are an error.
    pub fn from_lookup<F>(lookup: F) -> GateResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            api_token: ApiToken::new(get("API_TOKEN", DEFAULT_API_TOKEN)),
            signing_key: SigningKey::new(get("SIGN_SECRET", DEFAULT_SIGN_SECRET).into_bytes()),
            download_dir: PathBuf::from(get("DOWNLOAD_DIR", DEFAULT_DOWNLOAD_DIR)),
            cookies_path: PathBuf::from(get("COOKIES_PATH", DEFAULT_COOKIES_PATH)),
            ytdlp_bin: get("YTDLP_BIN", DEFAULT_YTDLP_BIN),
            ytdlp_timeout_secs: parse_or(&lookup, "YTDLP_TIMEOUT_SECS", DEFAULT_YTDLP_TIMEOUT_SECS)?,
            api_host: get("API_HOST", DEFAULT_API_HOST),
            api_port: parse_or(&lookup, "API_PORT", DEFAULT_API_PORT)?,
        })
    }

    /// `host:port` for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> GateResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| GateError::Config(format!("{key}={raw:?}: {e}"))),
    }
}
