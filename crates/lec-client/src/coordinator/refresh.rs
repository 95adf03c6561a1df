use lec_core::enums::OperationKind;

use crate::board::QuestionBoard;
use crate::catalog::PathParams;
use crate::dispatcher::RequestDispatcher;
use crate::error::OperationError;
use crate::extract::extract_questions;
use crate::local::LocalFallbackStore;
use crate::transport::Transport;

/// How the list was refreshed after a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshStrategy {
    /// The page's own refresh hook.
    Hook,
    /// A synthetic change signal on the chapter-selection control.
    ChangeSignal,
    /// A direct fetch, rendered by the coordinator.
    Refetch,
}

/// Fetch the questions of `chapter_id` and show them, drafts appended.
///
/// Returns the number of rows shown.
///
/// # Errors
///
/// Returns [`OperationError::Dispatch`] when every fetch candidate failed,
/// or [`OperationError::UnrecognizedBody`] when the response held no
/// question list. The board is left untouched in both cases.
pub async fn reload_chapter<T: Transport>(
    dispatcher: &RequestDispatcher<'_, T>,
    board: &QuestionBoard,
    store: &LocalFallbackStore,
    chapter_id: &str,
) -> Result<usize, OperationError> {
    let success = dispatcher
        .attempt_sequence(OperationKind::Fetch, &PathParams::for_chapter(chapter_id), None)
        .await?;

    let mut questions = match success.body.as_ref() {
        Some(body) => extract_questions(body).ok_or_else(|| OperationError::UnrecognizedBody {
            path: success.path.clone(),
        })?,
        None => Vec::new(),
    };
    questions.extend(store.drafts_for(chapter_id));

    board.show(Some(chapter_id), questions);
    let shown = board.rows().len();
    tracing::debug!(chapter_id, shown, "chapter reloaded");
    Ok(shown)
}
