use lec_core::entities::QuizQuestion;
use lec_core::enums::{OperationKind, Severity};
use lec_core::ids;

use crate::board::QuestionBoard;
use crate::catalog::{Endpoint, PathParams, PayloadFormat};
use crate::collaborators::Collaborators;
use crate::dispatcher::RequestDispatcher;
use crate::error::OperationError;
use crate::extract::extract_saved_ids;
use crate::local::LocalFallbackStore;
use crate::payload::SaveBatch;
use crate::transport::Transport;

use super::refresh::{RefreshStrategy, reload_chapter};

/// Details of a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    pub chapter_id: String,
    pub endpoint: Endpoint,
    pub format: PayloadFormat,
    pub attempts: usize,
    /// Ids the backend reported, when it reported any.
    pub saved_ids: Vec<String>,
    pub refresh: RefreshStrategy,
}

/// How a save ended.
#[derive(Debug)]
pub enum SaveOutcome {
    Saved(SaveReport),
    /// Rejected locally; no request was sent.
    Rejected(OperationError),
    /// Every candidate failed; nothing is marked persisted.
    Failed(OperationError),
}

impl SaveOutcome {
    #[must_use]
    pub const fn report(&self) -> Option<&SaveReport> {
        match self {
            Self::Saved(report) => Some(report),
            Self::Rejected(_) | Self::Failed(_) => None,
        }
    }
}

/// Validates, dispatches, and refreshes one batch save.
pub struct SaveCoordinator<'a, T> {
    dispatcher: RequestDispatcher<'a, T>,
    board: &'a QuestionBoard,
    store: &'a LocalFallbackStore,
    collab: Collaborators<'a>,
}

impl<'a, T: Transport> SaveCoordinator<'a, T> {
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
        }
    }

    /// Save `questions` to `chapter_id`, or to the selected chapter when
    /// none is given.
    pub async fn save(&self, questions: &[QuizQuestion], chapter_id: Option<&str>) -> SaveOutcome {
        let chapter_id = match self.validate(questions, chapter_id) {
            Ok(chapter_id) => chapter_id,
            Err(error) => {
                self.collab
                    .notifier
                    .notify(&format!("Cannot save: {error}"), Severity::Warning);
                return SaveOutcome::Rejected(error);
            }
        };

        self.collab.notifier.notify(
            &format!("Saving {} question(s)...", questions.len()),
            Severity::Info,
        );

        let batch = SaveBatch::new(chapter_id.clone(), questions.to_vec());
        let result = self
            .dispatcher
            .attempt_sequence(
                OperationKind::Save,
                &PathParams {
                    id: None,
                    chapter_id: Some(&chapter_id),
                },
                Some(&batch),
            )
            .await;

        let success = match result {
            Ok(success) => success,
            Err(error) => {
                self.collab.notifier.notify(
                    &format!("Save failed: {}", error.last_message()),
                    Severity::Error,
                );
                return SaveOutcome::Failed(error.into());
            }
        };

        let cleared = self.store.remove_many(questions.iter().map(|q| q.id.as_str()));
        let saved_ids = success
            .body
            .as_ref()
            .map(extract_saved_ids)
            .unwrap_or_default();
        tracing::info!(
            chapter_id = %chapter_id,
            count = questions.len(),
            drafts_cleared = cleared,
            endpoint = %success.candidate.endpoint,
            format = %success.candidate.format,
            "questions saved"
        );
        self.collab.notifier.notify(
            &format!("Saved {} question(s)", questions.len()),
            Severity::Success,
        );

        let refresh = self.refresh(&chapter_id).await;
        SaveOutcome::Saved(SaveReport {
            chapter_id,
            endpoint: success.candidate.endpoint,
            format: success.candidate.format,
            attempts: success.attempts,
            saved_ids,
            refresh,
        })
    }

    fn validate(
        &self,
        questions: &[QuizQuestion],
        chapter_id: Option<&str>,
    ) -> Result<String, OperationError> {
        if questions.is_empty() {
            return Err(OperationError::EmptyBatch);
        }
        let chapter_id = chapter_id
            .filter(|c| !ids::is_placeholder(c))
            .map(|c| c.trim().to_string())
            .or_else(|| {
                self.collab
                    .chapters
                    .current_chapter()
                    .filter(|c| !ids::is_placeholder(c))
            })
            .ok_or(OperationError::MissingChapter)?;
        for question in questions {
            question.validate()?;
        }
        Ok(chapter_id)
    }

    /// Refresh the list with the first strategy the page supports.
    async fn refresh(&self, chapter_id: &str) -> RefreshStrategy {
        if let Some(hook) = self.collab.refresh_hook {
            hook.refresh(chapter_id);
            return RefreshStrategy::Hook;
        }
        if self.collab.chapters.supports_change_signal() {
            self.collab.chapters.emit_change();
            return RefreshStrategy::ChangeSignal;
        }
        if let Err(error) =
            reload_chapter(&self.dispatcher, self.board, self.store, chapter_id).await
        {
            tracing::warn!(chapter_id, %error, "list refresh after save failed");
            self.collab.notifier.notify(
                &format!("Saved, but the list could not be refreshed: {error}"),
                Severity::Warning,
            );
        }
        RefreshStrategy::Refetch
    }
}
