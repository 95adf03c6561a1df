//! Request bodies for each [`PayloadFormat`].

use lec_core::entities::QuizQuestion;
use serde_json::{Map, Value, json};

use crate::catalog::PayloadFormat;

/// Questions to persist together with the chapter they belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveBatch {
    pub chapter_id: String,
    pub questions: Vec<QuizQuestion>,
}

impl SaveBatch {
    pub fn new(chapter_id: impl Into<String>, questions: Vec<QuizQuestion>) -> Self {
        Self {
            chapter_id: chapter_id.into(),
            questions,
        }
    }
}

/// Build the request body for `format`.
///
/// Save formats need a batch; without one they produce no body.
#[must_use]
pub fn build_body(format: PayloadFormat, batch: Option<&SaveBatch>) -> Option<Value> {
    match format {
        PayloadFormat::Empty => None,
        PayloadFormat::DeleteFlag => Some(json!({ "isDeleted": true })),
        PayloadFormat::SnakeDeleteFlag => Some(json!({ "is_deleted": true })),
        PayloadFormat::WrappedWithMetadata => batch.map(|b| {
            json!({
                "chapterId": b.chapter_id,
                "questions": wire_questions(b),
                "count": b.questions.len(),
                "savedAt": chrono::Utc::now().to_rfc3339(),
            })
        }),
        PayloadFormat::FlatArray => batch.map(|b| Value::Array(wire_questions(b))),
        PayloadFormat::SnakeCaseWrapped => batch.map(|b| {
            json!({
                "chapter_id": b.chapter_id,
                "questions": wire_questions(b)
                    .into_iter()
                    .map(snake_case_keys)
                    .collect::<Vec<_>>(),
            })
        }),
    }
}

/// Questions as sent: stamped with the batch chapter, ephemeral ids dropped
/// so the backend assigns real ones.
fn wire_questions(batch: &SaveBatch) -> Vec<Value> {
    batch
        .questions
        .iter()
        .map(|q| {
            let mut q = q.clone();
            q.chapter_id = Some(batch.chapter_id.clone());
            let ephemeral = q.is_ephemeral();
            let mut value = serde_json::to_value(&q).unwrap_or(Value::Null);
            if ephemeral {
                if let Value::Object(map) = &mut value {
                    map.remove("id");
                }
            }
            value
        })
        .collect()
}

/// Rename the top-level and nested object keys of `value` from camelCase
/// to snake_case.
fn snake_case_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (to_snake_case(&k), snake_case_keys(v)))
                .collect::<Map<_, _>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(snake_case_keys).collect()),
        other => other,
    }
}

fn to_snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            if !out.is_empty() {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
