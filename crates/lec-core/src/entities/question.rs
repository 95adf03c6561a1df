use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::QuestionType;
use crate::errors::CoreError;
use crate::ids;

/// One selectable option of a choice question.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOption {
    #[serde(alias = "option_id", alias = "key")]
    pub option_id: String,
    #[serde(alias = "text", alias = "content")]
    pub label: String,
}

impl QuestionOption {
    pub fn new(option_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            option_id: option_id.into(),
            label: label.into(),
        }
    }
}

/// Correct answer of a question.
///
/// `One` holds an option id for single-choice questions and free text for
/// short-answer questions; the question type decides which.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(untagged)]
pub enum Answer {
    Many(Vec<String>),
    Flag(bool),
    One(String),
}

/// A quiz question attached to a course chapter.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    #[serde(alias = "_id", alias = "question_id")]
    pub id: String,
    #[serde(rename = "type", alias = "question_type", alias = "questionType")]
    pub question_type: QuestionType,
    #[serde(alias = "prompt_text", alias = "question", alias = "stem")]
    pub prompt_text: String,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        alias = "correct_answer",
        alias = "answer"
    )]
    pub correct_answer: Option<Answer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, alias = "chapter_id")]
    pub chapter_id: Option<String>,
    #[serde(default, alias = "is_deleted", alias = "deleted")]
    pub is_deleted: bool,
    #[serde(default)]
    pub order: u32,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "created_at")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "updated_at")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl QuizQuestion {
    /// Build an unsaved question with a fresh ephemeral id.
    pub fn draft(
        question_type: QuestionType,
        prompt_text: impl Into<String>,
        chapter_id: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ids::new_ephemeral_id(),
            question_type,
            prompt_text: prompt_text.into(),
            options: Vec::new(),
            correct_answer: None,
            explanation: None,
            chapter_id,
            is_deleted: false,
            order: 0,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// Whether this question exists only in page state.
    #[must_use]
    pub fn is_ephemeral(&self) -> bool {
        ids::is_ephemeral(&self.id)
    }

    /// Local coherence checks run before a save is dispatched.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidQuestion`] for an empty prompt, a choice
    /// question without options, or an answer shape the type cannot hold.
    pub fn validate(&self) -> Result<(), CoreError> {
        let invalid = |reason: &str| CoreError::InvalidQuestion {
            id: self.id.clone(),
            reason: reason.to_string(),
        };

        if self.prompt_text.trim().is_empty() {
            return Err(invalid("prompt text is empty"));
        }
        if self.question_type.expects_options() && self.options.is_empty() {
            return Err(invalid("choice question has no options"));
        }
        match (&self.correct_answer, self.question_type) {
            (Some(Answer::Many(_)), ty) if !ty.is_multi_answer() => {
                Err(invalid("only multiple-choice questions take a list answer"))
            }
            (Some(_), QuestionType::Discussion) => {
                Err(invalid("discussion questions have no correct answer"))
            }
            _ => Ok(()),
        }
    }
}
