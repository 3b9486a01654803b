use thiserror::Error;

/// Crate-wide error type.
///
/// Host-facing failures (`HostFetchFailed`, `HostDeleteFailed`) are
/// distinguishable so callers can show different user-visible messages.
/// The other two variants are programming-contract errors and are rejected
/// synchronously, before any host call is made.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum AuditError {
    /// A cookie record violates a structural precondition (missing required
    /// field). Never silently coerced.
    #[error("Invalid cookie record: missing {field}")]
    InvalidRecord { field: &'static str },

    /// The cookie store fetch failed. The canonical collection is left at
    /// its previous, stale-but-valid value.
    #[error("Cookie store fetch failed: {reason}")]
    HostFetchFailed { reason: String },

    /// The cookie store deletion failed. Selection and canonical collection
    /// are left untouched.
    #[error("Cookie store delete failed: {reason}")]
    HostDeleteFailed { reason: String },

    /// A contract violation: removing with no selection, or selecting a
    /// record outside the current filtered view.
    #[error("Precondition violation: {what}")]
    PreconditionViolation { what: &'static str },
}

impl AuditError {
    pub fn fetch_failed(reason: impl Into<String>) -> Self {
        AuditError::HostFetchFailed {
            reason: reason.into(),
        }
    }

    pub fn delete_failed(reason: impl Into<String>) -> Self {
        AuditError::HostDeleteFailed {
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AuditError>;

// rusqlite failures surface at the store boundary as host failures.
// A busy/locked database is the common case when the browser is running.
impl From<rusqlite::Error> for AuditError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(e, _)
                if e.code == rusqlite::ffi::ErrorCode::DatabaseBusy
                    || e.code == rusqlite::ffi::ErrorCode::DatabaseLocked =>
            {
                AuditError::HostFetchFailed {
                    reason: "cookie database is locked by the browser".to_string(),
                }
            }
            _ => AuditError::HostFetchFailed {
                reason: err.to_string(),
            },
        }
    }
}
