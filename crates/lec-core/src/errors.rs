//! Cross-cutting error types for Lectern.
//!
//! Transport and dispatch errors live in `lec-client`; configuration errors in
//! `lec-config`. A unified error is deferred to `lec-cli` where they converge.

use thiserror::Error;

/// Errors that can be raised by any Lectern crate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// An entity id is empty or a placeholder such as `undefined`.
    #[error("Missing entity id: {0:?}")]
    MissingId(String),

    /// A question failed local coherence checks.
    #[error("Invalid question {id}: {reason}")]
    InvalidQuestion { id: String, reason: String },
}
