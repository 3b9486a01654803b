use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::base::auditerror::AuditError;

/// A read-only snapshot of one cookie as seen by the host cookie store.
///
/// Loosely modeled after Chromium's `net::CanonicalCookie`, reduced to the
/// attributes the audit reads. A leading `.` on `domain` marks a domain-wide
/// (third-party-eligible) cookie; its absence marks a host-only, first-party
/// cookie. `expires` of `None` means a session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieRecord {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,
    pub secure: bool,
    pub http_only: bool,
    #[serde(with = "time::serde::timestamp::option")]
    pub expires: Option<OffsetDateTime>,
}

/// Identity of a cookie within a store: `(name, domain, path)`.
///
/// Records are immutable snapshots, not live references, so equality of the
/// key is how "the same cookie" is decided across refreshes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CookieKey {
    pub name: String,
    pub domain: String,
    pub path: String,
}

impl CookieRecord {
    /// Build a record from a Unix-seconds expiration timestamp, the form
    /// browser cookie APIs hand out. `expires_unix` of `None` yields a
    /// session cookie; an out-of-range timestamp is treated the same way.
    #[allow(clippy::too_many_arguments)]
    pub fn from_unix_expiry(
        name: impl Into<String>,
        value: impl Into<String>,
        domain: impl Into<String>,
        path: impl Into<String>,
        secure: bool,
        http_only: bool,
        expires_unix: Option<i64>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: domain.into(),
            path: path.into(),
            secure,
            http_only,
            expires: expires_unix.and_then(|s| OffsetDateTime::from_unix_timestamp(s).ok()),
        }
    }

    /// Storage footprint proxy: value bytes plus name bytes.
    pub fn size_bytes(&self) -> usize {
        self.value.len() + self.name.len()
    }

    /// A cookie without a leading dot on its domain is host-only.
    pub fn is_first_party(&self) -> bool {
        !self.domain.starts_with('.')
    }

    /// A cookie without an expiration timestamp lives for the session.
    pub fn is_session(&self) -> bool {
        self.expires.is_none()
    }

    pub fn key(&self) -> CookieKey {
        CookieKey {
            name: self.name.clone(),
            domain: self.domain.clone(),
            path: self.path.clone(),
        }
    }

    /// Structural preconditions. A record missing its name or domain cannot
    /// be classified or addressed for deletion and is rejected outright.
    pub fn validate(&self) -> Result<(), AuditError> {
        if self.name.is_empty() {
            return Err(AuditError::InvalidRecord { field: "name" });
        }
        if self.domain.is_empty() {
            return Err(AuditError::InvalidRecord { field: "domain" });
        }
        Ok(())
    }

    /// Human-readable expiry: the calendar date, or "Session".
    pub fn expiry_display(&self) -> String {
        match self.expires {
            Some(when) => {
                let format = time::macros::format_description!("[year]-[month]-[day]");
                when.format(&format)
                    .unwrap_or_else(|_| when.unix_timestamp().to_string())
            }
            None => "Session".to_string(),
        }
    }
}
