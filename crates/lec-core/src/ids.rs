//! Ephemeral ID generation and classification.
//!
//! Questions created in the console (drafts, AI output not yet saved) get a
//! locally generated id with the [`EPHEMERAL_PREFIX`]. Such an id has never
//! been confirmed by the backend, so deleting it is a purely local operation.

use crate::errors::CoreError;

/// Prefix carried by every locally generated question id.
pub const EPHEMERAL_PREFIX: &str = "local_";

/// Values that show up in place of an id when the page lost track of it.
const PLACEHOLDER_IDS: &[&str] = &["undefined", "null", "none", "nan"];

/// Generate a fresh ephemeral id, e.g. `local_9f2c4a1be037`.
#[must_use]
pub fn new_ephemeral_id() -> String {
    let mut buf = [0u8; 6];
    if getrandom::fill(&mut buf).is_err() {
        let nanos = chrono::Utc::now()
            .timestamp_nanos_opt()
            .unwrap_or_default()
            .to_le_bytes();
        buf.copy_from_slice(&nanos[..6]);
    }
    let suffix: String = buf.iter().map(|b| format!("{b:02x}")).collect();
    format!("{EPHEMERAL_PREFIX}{suffix}")
}

/// Whether `id` was generated locally and never persisted.
#[must_use]
pub fn is_ephemeral(id: &str) -> bool {
    id.starts_with(EPHEMERAL_PREFIX)
}

/// Whether `id` is empty or one of the stringified "absent" values.
#[must_use]
pub fn is_placeholder(id: &str) -> bool {
    let trimmed = id.trim();
    trimmed.is_empty()
        || PLACEHOLDER_IDS
            .iter()
            .any(|p| trimmed.eq_ignore_ascii_case(p))
}

/// Reject placeholder ids before any network work is attempted.
///
/// # Errors
///
/// Returns [`CoreError::MissingId`] when `id` is a placeholder.
pub fn require_id(id: &str) -> Result<&str, CoreError> {
    if is_placeholder(id) {
        return Err(CoreError::MissingId(id.to_string()));
    }
    Ok(id.trim())
}
