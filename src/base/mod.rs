//! Base types and error handling.
//!
//! - [`AuditError`](auditerror::AuditError): the crate-wide error taxonomy
//! - [`Clock`](clock::Clock): injected time source for deterministic
//!   classification

pub mod auditerror;
pub mod clock;

pub use auditerror::{AuditError, Result};
pub use clock::{Clock, FixedClock, SystemClock};
