//! Subscribe/unsubscribe lifecycle for row action handlers.
//!
//! Each row holds at most one live subscription. Binding a row again drops
//! the previous subscription first, so a list that is re-rendered many times
//! never accumulates duplicate handlers. A [`Subscription`] from an older
//! binding cannot remove a newer one.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::board::RowAction;

/// Called with the row id and the action the operator picked.
pub type ActionHandler = Arc<dyn Fn(&str, RowAction) + Send + Sync>;

/// Token returned by [`Bindings::bind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    row_id: String,
    token: u64,
}

impl Subscription {
    #[must_use]
    pub fn row_id(&self) -> &str {
        &self.row_id
    }
}

struct Slot {
    token: u64,
    actions: Vec<RowAction>,
    handler: ActionHandler,
}

#[derive(Default)]
pub struct Bindings {
    next_token: AtomicU64,
    slots: Mutex<HashMap<String, Slot>>,
}

impl std::fmt::Debug for Bindings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bindings")
            .field("rows", &self.len())
            .finish_non_exhaustive()
    }
}

impl Bindings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Slot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Attach `handler` for `actions` on `row_id`, replacing any earlier
    /// subscription on that row.
    pub fn bind(&self, row_id: &str, actions: &[RowAction], handler: ActionHandler) -> Subscription {
        let token = self.next_token.fetch_add(1, Ordering::Relaxed);
        let replaced = self.lock().insert(
            row_id.to_string(),
            Slot {
                token,
                actions: actions.to_vec(),
                handler,
            },
        );
        if replaced.is_some() {
            tracing::trace!(row_id, token, "rebound row handlers");
        }
        Subscription {
            row_id: row_id.to_string(),
            token,
        }
    }

    /// Remove `subscription` if it is still the live one for its row.
    pub fn unsubscribe(&self, subscription: &Subscription) -> bool {
        let mut slots = self.lock();
        if slots
            .get(&subscription.row_id)
            .is_some_and(|slot| slot.token == subscription.token)
        {
            slots.remove(&subscription.row_id);
            return true;
        }
        false
    }

    /// Remove whatever is bound to `row_id`.
    pub fn unbind_row(&self, row_id: &str) -> bool {
        self.lock().remove(row_id).is_some()
    }

    /// Remove every binding whose row is not in `keep`.
    pub fn retain_rows(&self, keep: &[&str]) {
        self.lock().retain(|row_id, _| keep.contains(&row_id.as_str()));
    }

    /// Invoke the handler bound to `row_id` for `action`. Returns `false`
    /// when nothing is bound or the row does not offer that action.
    pub fn trigger(&self, row_id: &str, action: RowAction) -> bool {
        let handler = {
            let slots = self.lock();
            match slots.get(row_id) {
                Some(slot) if slot.actions.contains(&action) => Arc::clone(&slot.handler),
                _ => return false,
            }
        };
        handler(row_id, action);
        true
    }

    #[must_use]
    pub fn is_bound(&self, row_id: &str) -> bool {
        self.lock().contains_key(row_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
