//! Admin bearer tokens.
//!
//! A token is `qa_` followed by 32 random bytes in unpadded URL-safe base64.
//! Only the SHA-256 of the whole token is stored; the prefix lets secret
//! scanners recognise leaked catalog admin tokens.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use thiserror::Error;
use zeroize::{Zeroize, Zeroizing};

/// Prefix of every issued token.
pub const ADMIN_TOKEN_PREFIX: &str = "qa_";

/// Random bytes behind each token.
pub const ADMIN_TOKEN_BYTES: usize = 32;

#[derive(Debug, Error)]
pub enum AdminTokenError {
    #[error("admin token format is invalid")]
    InvalidFormat,
}

/// A freshly issued raw token, wiped from memory on drop.
pub struct AdminToken(String);

impl AdminToken {
    /// Generate a new random token.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = Zeroizing::new([0_u8; ADMIN_TOKEN_BYTES]);

        OsRng.fill_bytes(&mut bytes[..]);

        Self(format!("{ADMIN_TOKEN_PREFIX}{}", URL_SAFE_NO_PAD.encode(&bytes[..])))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hand the raw token to the caller, once.
    #[must_use]
    pub fn reveal(mut self) -> String {
        std::mem::take(&mut self.0)
    }
}

impl Debug for AdminToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("AdminToken(**redacted**)")
    }
}

impl Drop for AdminToken {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Reject strings that cannot be a token before touching storage.
///
/// # Errors
///
/// Returns [`AdminTokenError::InvalidFormat`] for a wrong prefix or a body
/// that does not decode to [`ADMIN_TOKEN_BYTES`] bytes.
pub fn check_admin_token(token: &str) -> Result<(), AdminTokenError> {
    let body = token
        .strip_prefix(ADMIN_TOKEN_PREFIX)
        .ok_or(AdminTokenError::InvalidFormat)?;

    let decoded = Zeroizing::new(
        URL_SAFE_NO_PAD
            .decode(body)
            .map_err(|_decode| AdminTokenError::InvalidFormat)?,
    );

    if decoded.len() == ADMIN_TOKEN_BYTES {
        Ok(())
    } else {
        Err(AdminTokenError::InvalidFormat)
    }
}

/// Stored form of a token.
#[must_use]
pub fn admin_token_hash(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}
