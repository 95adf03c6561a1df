use std::path::Path;

use anyhow::{Context, bail};
use lec_client::Transport;
use lec_client::console::{Console, EventOutcome, UiEvent};
use lec_client::coordinator::SaveOutcome;
use lec_core::entities::QuizQuestion;
use lec_core::ids;
use serde_json::Value;

use crate::app::App;
use crate::cli::SaveArgs;

pub async fn handle(args: &SaveArgs, app: &mut App) -> anyhow::Result<()> {
    let questions = read_questions(&args.file)?;

    if let Err(error) = app.console.reload(&app.chapter_id).await {
        tracing::debug!(%error, "listing before save failed");
    }
    let staged = stage(&app.console, questions);

    let event = UiEvent::Save {
        questions: staged,
        chapter_id: Some(app.chapter_id.clone()),
    };
    let outcome = app.console.handle(event).await;
    super::settle(app).await;

    match outcome {
        EventOutcome::Saved(SaveOutcome::Saved(report)) => {
            tracing::info!(
                chapter_id = %report.chapter_id,
                endpoint = %report.endpoint,
                format = %report.format,
                attempts = report.attempts,
                "save accepted"
            );
            Ok(())
        }
        EventOutcome::Saved(SaveOutcome::Rejected(error) | SaveOutcome::Failed(error)) => {
            Err(error.into())
        }
        EventOutcome::Deleted(_) | EventOutcome::Reloaded(_) => {
            bail!("save produced no save outcome")
        }
    }
}

/// Keep unsaved questions on the board as drafts. Questions that already
/// carry a backend id are passed through untouched so the save updates them.
fn stage<T: Transport>(console: &Console<T>, questions: Vec<QuizQuestion>) -> Vec<QuizQuestion> {
    questions
        .into_iter()
        .filter_map(|question| {
            if !question.is_ephemeral() {
                return Some(question);
            }
            let id = console.add_draft(question);
            console.store().get(&id)
        })
        .collect()
}

/// Read questions from a JSON file holding either an array or an object
/// with a `questions` array. Questions without an id get an unsaved one.
pub fn read_questions(path: &Path) -> anyhow::Result<Vec<QuizQuestion>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;

    let list = match value {
        Value::Array(list) => list,
        Value::Object(mut map) => match map.remove("questions") {
            Some(Value::Array(list)) => list,
            _ => bail!("{} has no `questions` array", path.display()),
        },
        _ => bail!("{} must hold a question array", path.display()),
    };

    list.into_iter()
        .enumerate()
        .map(|(index, mut item)| {
            if let Value::Object(map) = &mut item {
                map.entry("id")
                    .or_insert_with(|| Value::String(ids::new_ephemeral_id()));
            }
            serde_json::from_value(item)
                .with_context(|| format!("question #{} in {} is malformed", index + 1, path.display()))
        })
        .collect()
}
