//! Interfaces to the page around the persistence client.
//!
//! Rendering, notifications, chapter selection, confirmation dialogs and the
//! optional page-level refresh hook are supplied by the caller. All methods
//! are synchronous: they run on the UI side and must not block on I/O.

use lec_core::enums::Severity;

use crate::board::{Row, RowAffordances};

/// Draws the question list.
pub trait Renderer: Send + Sync {
    /// Draw a non-empty list of rows.
    fn render_rows(&self, chapter_id: Option<&str>, rows: &[Row]);

    /// Draw the single empty-state placeholder.
    fn render_empty(&self, chapter_id: Option<&str>);

    /// Redraw the action area of one row.
    fn update_row(&self, id: &str, affordances: &RowAffordances);
}

/// Operator-facing messages.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

/// The page's chapter-selection control.
pub trait ChapterSource: Send + Sync {
    /// Currently selected chapter, if any.
    fn current_chapter(&self) -> Option<String>;

    /// Whether the control can deliver a synthetic change signal.
    fn supports_change_signal(&self) -> bool {
        false
    }

    /// Fire a synthetic change signal so listeners reload the list.
    fn emit_change(&self) {}
}

/// Page-level list refresh, when the page exposes one.
pub trait RefreshHook: Send + Sync {
    fn refresh(&self, chapter_id: &str);
}

/// Blocking yes/no confirmation.
pub trait Confirmer: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

/// Confirms everything. For callers that already asked.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl Confirmer for AlwaysConfirm {
    fn confirm(&self, _message: &str) -> bool {
        true
    }
}

/// The collaborators a coordinator talks to, borrowed for one operation.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub notifier: &'a dyn Notifier,
    pub chapters: &'a dyn ChapterSource,
    pub confirmer: &'a dyn Confirmer,
    pub refresh_hook: Option<&'a dyn RefreshHook>,
}
