use crate::app::App;

pub async fn handle(app: &App) -> anyhow::Result<()> {
    let shown = app.console.reload(&app.chapter_id).await?;
    tracing::debug!(chapter_id = %app.chapter_id, shown, "listed chapter");
    Ok(())
}
