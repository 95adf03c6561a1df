//! Operation coordinators.
//!
//! A coordinator sequences one user action end to end: validation,
//! confirmation, busy state, dispatch, and the UI-facing result. Every
//! failure is turned into a notification here; nothing propagates to the
//! page as an error.

mod delete;
mod refresh;
mod save;

pub use delete::{DeleteCoordinator, DeleteOutcome};
pub use refresh::{RefreshStrategy, reload_chapter};
pub use save::{SaveCoordinator, SaveOutcome, SaveReport};
