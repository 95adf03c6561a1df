use lec_core::enums::{DeleteState, OperationKind, Severity};
use lec_core::ids;

use crate::board::QuestionBoard;
use crate::catalog::PathParams;
use crate::collaborators::Collaborators;
use crate::dispatcher::RequestDispatcher;
use crate::error::OperationError;
use crate::local::LocalFallbackStore;
use crate::transport::Transport;

const CONFIRM_MESSAGE: &str = "Delete this question? This cannot be undone.";

/// How a delete ended.
#[derive(Debug)]
pub enum DeleteOutcome {
    /// The operator declined the confirmation. Nothing changed.
    Declined,
    /// The row is gone. `local` is true when no request was sent.
    Removed { local: bool, list_empty: bool },
    /// The id was rejected before confirmation or dispatch.
    Rejected(OperationError),
    /// Every candidate failed; the row is back to its previous state.
    Failed(OperationError),
}

impl DeleteOutcome {
    #[must_use]
    pub const fn is_removed(&self) -> bool {
        matches!(self, Self::Removed { .. })
    }
}

/// Drives one delete of one question row through [`DeleteState`].
pub struct DeleteCoordinator<'a, T> {
    dispatcher: RequestDispatcher<'a, T>,
    board: &'a QuestionBoard,
    store: &'a LocalFallbackStore,
    collab: Collaborators<'a>,
    state: DeleteState,
}

impl<'a, T: Transport> DeleteCoordinator<'a, T> {
    pub const fn new(
        dispatcher: RequestDispatcher<'a, T>,
        board: &'a QuestionBoard,
        store: &'a LocalFallbackStore,
        collab: Collaborators<'a>,
    ) -> Self {
        Self {
            dispatcher,
            board,
            store,
            collab,
            state: DeleteState::Idle,
        }
    }

    #[must_use]
    pub const fn state(&self) -> DeleteState {
        self.state
    }

    fn advance(&mut self, next: DeleteState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid delete transition {} -> {next}",
            self.state
        );
        tracing::trace!(from = %self.state, to = %next, "delete state");
        self.state = next;
    }

    /// Run the delete of `id` to completion. A coordinator that already
    /// settled starts over from [`DeleteState::Idle`].
    pub async fn run(&mut self, id: &str) -> DeleteOutcome {
        if self.state.is_settled() {
            self.state = DeleteState::Idle;
        }
        let id = match ids::require_id(id) {
            Ok(id) => id,
            Err(error) => {
                self.collab
                    .notifier
                    .notify(&format!("Cannot delete: {error}"), Severity::Error);
                return DeleteOutcome::Rejected(error.into());
            }
        };

        self.advance(DeleteState::ConfirmPending);
        if !self.collab.confirmer.confirm(CONFIRM_MESSAGE) {
            self.advance(DeleteState::Idle);
            return DeleteOutcome::Declined;
        }

        if ids::is_ephemeral(id) {
            self.store.remove(id);
            let removal = self.board.remove_row(id);
            self.advance(DeleteState::SettledSuccess);
            tracing::debug!(id, "removed unsaved question locally");
            self.collab
                .notifier
                .notify("Question removed", Severity::Success);
            return DeleteOutcome::Removed {
                local: true,
                list_empty: removal.left_empty() || self.board.is_empty(),
            };
        }

        let chapter_id = self
            .board
            .question(id)
            .and_then(|q| q.chapter_id)
            .or_else(|| self.collab.chapters.current_chapter());

        self.advance(DeleteState::Dispatching);
        let original = self.board.begin_busy(id);

        let result = self
            .dispatcher
            .attempt_sequence(
                OperationKind::Delete,
                &PathParams::for_question(id, chapter_id.as_deref()),
                None,
            )
            .await;

        match result {
            Ok(success) => {
                let removal = self.board.remove_row(id);
                self.advance(DeleteState::SettledSuccess);
                tracing::info!(id, endpoint = %success.candidate.endpoint, "question deleted");
                self.collab
                    .notifier
                    .notify("Question deleted", Severity::Success);
                if let (Some(hook), Some(chapter_id)) =
                    (self.collab.refresh_hook, chapter_id.as_deref())
                {
                    hook.refresh(chapter_id);
                }
                DeleteOutcome::Removed {
                    local: false,
                    list_empty: removal.left_empty() || self.board.is_empty(),
                }
            }
            Err(error) => {
                if let Some(original) = original {
                    self.board.restore(id, original);
                }
                self.advance(DeleteState::SettledFailure);
                self.collab.notifier.notify(
                    &format!("Delete failed: {}", error.last_message()),
                    Severity::Error,
                );
                DeleteOutcome::Failed(error.into())
            }
        }
    }
}
