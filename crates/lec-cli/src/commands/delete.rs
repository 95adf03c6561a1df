use lec_client::board::RowAction;
use lec_client::console::{EventOutcome, UiEvent};
use lec_client::coordinator::DeleteOutcome;

use crate::app::App;
use crate::cli::DeleteArgs;

/// Delete through the row's bound action when the question is listed,
/// otherwise by id.
pub async fn handle(args: &DeleteArgs, app: &mut App) -> anyhow::Result<()> {
    if let Err(error) = app.console.reload(&app.chapter_id).await {
        tracing::debug!(%error, "listing before delete failed; deleting by id");
    }

    let outcomes = if app
        .console
        .board()
        .bindings()
        .trigger(&args.id, RowAction::Delete)
    {
        app.console.drain().await
    } else {
        let event = UiEvent::Delete { id: args.id.clone() };
        vec![app.console.handle(event).await]
    };

    for outcome in outcomes {
        match outcome {
            EventOutcome::Deleted(DeleteOutcome::Failed(error) | DeleteOutcome::Rejected(error)) => {
                return Err(error.into());
            }
            EventOutcome::Deleted(DeleteOutcome::Declined) => {
                eprintln!("Delete cancelled");
            }
            EventOutcome::Deleted(DeleteOutcome::Removed { list_empty, .. }) => {
                tracing::debug!(id = %args.id, list_empty, "delete settled");
            }
            EventOutcome::Saved(_) | EventOutcome::Reloaded(_) => {}
        }
    }
    super::settle(app).await;
    Ok(())
}
