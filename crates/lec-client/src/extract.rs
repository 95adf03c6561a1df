//! Locate payloads inside response bodies whose envelope varies by backend
//! revision.
//!
//! Each extractor looks in one place. They are tried in order and the first
//! one that yields a decodable value wins, the same search the dispatcher
//! runs over endpoints.

use lec_core::entities::QuizQuestion;
use serde_json::Value;

/// Points at the candidate node inside a response body.
pub type Extractor = fn(&Value) -> Option<&Value>;

fn top_level_array(body: &Value) -> Option<&Value> {
    body.is_array().then_some(body)
}

fn data_questions(body: &Value) -> Option<&Value> {
    body.get("data")?.get("questions")
}

fn data_items(body: &Value) -> Option<&Value> {
    body.get("data")?.get("items")
}

fn data(body: &Value) -> Option<&Value> {
    body.get("data")
}

fn questions(body: &Value) -> Option<&Value> {
    body.get("questions")
}

fn items(body: &Value) -> Option<&Value> {
    body.get("items")
}

fn result(body: &Value) -> Option<&Value> {
    body.get("result")
}

fn ids(body: &Value) -> Option<&Value> {
    body.get("ids")
}

fn data_ids(body: &Value) -> Option<&Value> {
    body.get("data")?.get("ids")
}

/// Where a question list may live, most likely first.
pub const QUESTION_LIST_EXTRACTORS: &[(&str, Extractor)] = &[
    ("array", top_level_array),
    ("data.questions", data_questions),
    ("data.items", data_items),
    ("data", data),
    ("questions", questions),
    ("items", items),
    ("result", result),
];

/// Where a list of server-assigned ids may live.
pub const SAVED_ID_EXTRACTORS: &[(&str, Extractor)] = &[("ids", ids), ("data.ids", data_ids)];

/// Find the question list in a fetch response.
#[must_use]
pub fn extract_questions(body: &Value) -> Option<Vec<QuizQuestion>> {
    QUESTION_LIST_EXTRACTORS.iter().find_map(|(name, extractor)| {
        let node = extractor(body)?;
        let list = serde_json::from_value::<Vec<QuizQuestion>>(node.clone()).ok()?;
        tracing::trace!(extractor = name, count = list.len(), "question list located");
        Some(list)
    })
}

/// Find the ids the backend assigned in a save response. Falls back to the
/// ids of an echoed question list; returns an empty list when neither is
/// present.
#[must_use]
pub fn extract_saved_ids(body: &Value) -> Vec<String> {
    let explicit = SAVED_ID_EXTRACTORS.iter().find_map(|(_, extractor)| {
        let node = extractor(body)?.as_array()?;
        let ids: Vec<String> = node
            .iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect();
        (!ids.is_empty()).then_some(ids)
    });

    explicit
        .or_else(|| extract_questions(body).map(|qs| qs.into_iter().map(|q| q.id).collect()))
        .unwrap_or_default()
}
