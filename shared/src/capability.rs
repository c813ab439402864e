//! Signed, time-limited download links.
//!
//! A link carries `(filename, exp, sig)` where
//! `sig = base64url_nopad(HMAC-SHA256(key, "{filename}:{exp}"))` and `exp` is
//! unix seconds. Nothing is stored server-side: a link is valid iff its
//! signature recomputes under the current key and `now <= exp`. Links cannot
//! be revoked before they expire.

use std::fmt;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::config::SigningKey;
use crate::errors::{CapabilityFailure, GateError, GateResult};

type HmacSha256 = Hmac<Sha256>;

/// Lifetime used when a mint request does not specify one.
pub const DEFAULT_EXPIRES_IN: i64 = 3600;

/// Path of the file-serving endpoint the links point at.
pub const DOWNLOAD_FILE_PATH: &str = "/download-file";

/// Current unix time in whole seconds.
pub fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Keyed MAC over the `filename:expiry` message. Shared by signer and verifier.
#[derive(Clone)]
struct LinkMac {
    mac: HmacSha256,
}

impl LinkMac {
    fn new(key: &SigningKey) -> GateResult<Self> {
        if key.as_bytes().is_empty() {
            return Err(GateError::Config("signing key must not be empty".to_string()));
        }
        let mac = HmacSha256::new_from_slice(key.as_bytes())
            .map_err(|e| GateError::Config(format!("signing key rejected: {e}")))?;
        Ok(Self { mac })
    }

    fn signature(&self, filename: &str, expiry: i64) -> String {
        let mut mac = self.mac.clone();
        mac.update(filename.as_bytes());
        mac.update(b":");
        mac.update(expiry.to_string().as_bytes());
        URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
    }
}

/// A minted link. Rendered with [`Capability::url`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capability {
    pub filename: String,
    pub expiry: i64,
    pub signature: String,
}

impl Capability {
    /// Relative URL: `/download-file?filename=<f>&exp=<exp>&sig=<sig>`.
    pub fn url(&self) -> String {
        format!(
            "{}?filename={}&exp={}&sig={}",
            DOWNLOAD_FILE_PATH,
            urlencoding::encode(&self.filename),
            self.expiry,
            self.signature
        )
    }
}

/// Mints signed links.
#[derive(Clone)]
pub struct UrlSigner {
    mac: LinkMac,
}

impl UrlSigner {
    pub fn new(key: &SigningKey) -> GateResult<Self> {
        Ok(Self { mac: LinkMac::new(key)? })
    }

    /// Signature for an explicit `(filename, expiry)` pair. Deterministic.
    pub fn sign(&self, filename: &str, expiry: i64) -> String {
        self.mac.signature(filename, expiry)
    }

    /// Mint a link valid for `expires_in` seconds after `now`.
    pub fn mint_at(&self, filename: &str, expires_in: i64, now: i64) -> GateResult<Capability> {
        if expires_in <= 0 {
            return Err(GateError::BadRequest(
                "expires_in must be a positive number of seconds".to_string(),
            ));
        }
        let expiry = now
            .checked_add(expires_in)
            .ok_or_else(|| GateError::BadRequest("expires_in is too large".to_string()))?;

        Ok(Capability {
            filename: filename.to_string(),
            expiry,
            signature: self.sign(filename, expiry),
        })
    }

    pub fn mint(&self, filename: &str, expires_in: i64) -> GateResult<Capability> {
        self.mint_at(filename, expires_in, unix_now())
    }
}

impl fmt::Debug for UrlSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlSigner").finish_non_exhaustive()
    }
}

/// Redeems signed links.
#[derive(Clone)]
pub struct UrlVerifier {
    mac: LinkMac,
}

impl UrlVerifier {
    pub fn new(key: &SigningKey) -> GateResult<Self> {
        Ok(Self { mac: LinkMac::new(key)? })
    }

    /// Check a presented link at time `now`. `exp` is the raw query value.
    pub fn verify_at(&self, filename: &str, exp: &str, sig: &str, now: i64) -> GateResult<()> {
        if let Err(reason) = self.check(filename, exp, sig, now) {
            warn!("Signed link rejected for {:?}: {}", filename, reason);
            return Err(GateError::Forbidden(reason));
        }
        Ok(())
    }

    fn check(&self, filename: &str, exp: &str, sig: &str, now: i64) -> Result<(), CapabilityFailure> {
        let expiry: i64 = exp.parse().map_err(|_| CapabilityFailure::Malformed)?;

        let expected = self.mac.signature(filename, expiry);
        let valid: bool = expected.as_bytes().ct_eq(sig.as_bytes()).into();
        if !valid {
            return Err(CapabilityFailure::BadSignature);
        }

        // Inclusive: a link is still good during its expiry second.
        if now > expiry {
            return Err(CapabilityFailure::Expired);
        }
        Ok(())
    }
}

impl fmt::Debug for UrlVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlVerifier").finish_non_exhaustive()
    }
}
