//! Admin session

use std::fmt::{Debug, Formatter, Result as FmtResult};

use jiff::Timestamp;

/// Bearer credentials for admin writes.
///
/// Passed explicitly to every write; dropping the value is logging out.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    username: Option<String>,
    expires_at: Option<Timestamp>,
}

impl Session {
    /// Wrap a token obtained elsewhere, e.g. from `QUARRY_TOKEN`.
    pub fn from_token(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            username: None,
            expires_at: None,
        }
    }

    pub(crate) fn issued(token: String, username: String, expires_at: Option<Timestamp>) -> Self {
        Self {
            token,
            username: Some(username),
            expires_at,
        }
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    #[must_use]
    pub fn expires_at(&self) -> Option<Timestamp> {
        self.expires_at
    }

    /// Whether the server has certainly stopped accepting this token.
    ///
    /// Tokens of unknown expiry are assumed valid until a 401 says otherwise.
    #[must_use]
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }

    /// `Authorization` header value.
    #[must_use]
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl Debug for Session {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Session")
            .field("token", &"[REDACTED]")
            .field("username", &self.username)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
