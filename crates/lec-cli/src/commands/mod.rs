use lec_client::console::EventOutcome;

use crate::app::App;
use crate::cli::Commands;

pub mod delete;
pub mod list;
pub mod save;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, app: &mut App) -> anyhow::Result<()> {
    match command {
        Commands::List(_) => list::handle(app).await,
        Commands::Save(args) => save::handle(&args, app).await,
        Commands::Delete(args) => delete::handle(&args, app).await,
    }
}

/// Run whatever the last operation queued, e.g. a reload after a save.
async fn settle(app: &mut App) {
    for outcome in app.console.drain().await {
        if let EventOutcome::Reloaded(Err(error)) = outcome {
            tracing::debug!(%error, "queued reload failed");
        }
    }
}
