//! Event loop tying the board, the session, and the coordinators together.
//!
//! Row action handlers and chapter change signals push [`UiEvent`]s into an
//! unbounded channel; the owner of the [`Console`] pulls them and runs the
//! matching coordinator. [`Console::handle`] takes `&self`, so operations on
//! different rows may be awaited concurrently.

use std::sync::Arc;

use lec_core::entities::QuizQuestion;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::board::{QuestionBoard, RowAction};
use crate::collaborators::{ChapterSource, Collaborators, Confirmer, Notifier, RefreshHook};
use crate::coordinator::{DeleteCoordinator, DeleteOutcome, SaveCoordinator, SaveOutcome, reload_chapter};
use crate::error::OperationError;
use crate::local::LocalFallbackStore;
use crate::session::SessionContext;
use crate::transport::Transport;

/// Something the operator did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Delete { id: String },
    Save {
        questions: Vec<QuizQuestion>,
        chapter_id: Option<String>,
    },
    Reload { chapter_id: String },
}

/// Result of handling one [`UiEvent`].
#[derive(Debug)]
pub enum EventOutcome {
    Deleted(DeleteOutcome),
    Saved(SaveOutcome),
    Reloaded(Result<usize, OperationError>),
}

pub type EventSender = UnboundedSender<UiEvent>;
pub type EventInbox = UnboundedReceiver<UiEvent>;

#[must_use]
pub fn event_channel() -> (EventSender, EventInbox) {
    mpsc::unbounded_channel()
}

/// Page-side collaborators handed to [`Console::new`].
pub struct ConsoleParts {
    pub notifier: Box<dyn Notifier>,
    pub chapters: Box<dyn ChapterSource>,
    pub confirmer: Box<dyn Confirmer>,
    pub refresh_hook: Option<Box<dyn RefreshHook>>,
}

pub struct Console<T> {
    ctx: SessionContext,
    transport: T,
    board: QuestionBoard,
    store: LocalFallbackStore,
    parts: ConsoleParts,
    inbox: EventInbox,
}

impl<T: Transport> Console<T> {
    /// Wire a console. Every row that offers a delete action is bound to
    /// send [`UiEvent::Delete`] on `events`.
    pub fn new(
        transport: T,
        board: QuestionBoard,
        parts: ConsoleParts,
        (events, inbox): (EventSender, EventInbox),
    ) -> Self {
        board.set_action_handler(Arc::new(move |id: &str, action: RowAction| {
            if action == RowAction::Delete {
                if events.send(UiEvent::Delete { id: id.to_string() }).is_err() {
                    tracing::warn!(id, "console inbox closed; delete click dropped");
                }
            } else {
                tracing::trace!(id, ?action, "row action has no handler");
            }
        }));
        Self {
            ctx: SessionContext::new(),
            transport,
            board,
            store: LocalFallbackStore::new(),
            parts,
            inbox,
        }
    }

    #[must_use]
    pub const fn context(&self) -> &SessionContext {
        &self.ctx
    }

    #[must_use]
    pub const fn board(&self) -> &QuestionBoard {
        &self.board
    }

    #[must_use]
    pub const fn store(&self) -> &LocalFallbackStore {
        &self.store
    }

    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    fn collaborators(&self) -> Collaborators<'_> {
        Collaborators {
            notifier: self.parts.notifier.as_ref(),
            chapters: self.parts.chapters.as_ref(),
            confirmer: self.parts.confirmer.as_ref(),
            refresh_hook: self.parts.refresh_hook.as_deref(),
        }
    }

    #[must_use]
    pub fn delete_coordinator(&self) -> DeleteCoordinator<'_, T> {
        DeleteCoordinator::new(
            self.ctx.dispatcher(&self.transport),
            &self.board,
            &self.store,
            self.collaborators(),
        )
    }

    #[must_use]
    pub fn save_coordinator(&self) -> SaveCoordinator<'_, T> {
        SaveCoordinator::new(
            self.ctx.dispatcher(&self.transport),
            &self.board,
            &self.store,
            self.collaborators(),
        )
    }

    /// Fetch and show `chapter_id`. Failures are reported to the notifier
    /// and returned.
    pub async fn reload(&self, chapter_id: &str) -> Result<usize, OperationError> {
        let dispatcher = self.ctx.dispatcher(&self.transport);
        let result = reload_chapter(&dispatcher, &self.board, &self.store, chapter_id).await;
        if let Err(error) = &result {
            self.parts.notifier.notify(
                &format!("Could not load questions: {error}"),
                lec_core::enums::Severity::Error,
            );
        }
        result
    }

    /// Keep an unsaved question on the board of its chapter.
    pub fn add_draft(&self, question: QuizQuestion) -> String {
        let id = self.store.insert(question);
        if let Some(chapter_id) = self.board.chapter_id() {
            let mut rows: Vec<QuizQuestion> =
                self.board.rows().into_iter().map(|r| r.question).collect();
            if let Some(draft) = self.store.get(&id) {
                if draft.chapter_id.as_deref() == Some(chapter_id.as_str()) {
                    rows.push(draft);
                }
            }
            self.board.show(Some(&chapter_id), rows);
        }
        id
    }

    pub async fn handle(&self, event: UiEvent) -> EventOutcome {
        tracing::debug!(?event, "handling ui event");
        match event {
            UiEvent::Delete { id } => {
                let mut coordinator = self.delete_coordinator();
                EventOutcome::Deleted(coordinator.run(&id).await)
            }
            UiEvent::Save {
                questions,
                chapter_id,
            } => EventOutcome::Saved(
                self.save_coordinator()
                    .save(&questions, chapter_id.as_deref())
                    .await,
            ),
            UiEvent::Reload { chapter_id } => EventOutcome::Reloaded(self.reload(&chapter_id).await),
        }
    }

    /// Handle every event already queued, in arrival order.
    pub async fn drain(&mut self) -> Vec<EventOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(event) = self.inbox.try_recv() {
            outcomes.push(self.handle(event).await);
        }
        outcomes
    }
}
