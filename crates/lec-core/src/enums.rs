//! Question types, operation kinds, severities, and the delete state machine.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! Status enums with state machines provide `allowed_next_states()` to enforce
//! valid transitions at the application layer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// QuestionType
// ---------------------------------------------------------------------------

/// Kind of quiz question.
///
/// Backends have used several spellings over time, so the older short names
/// are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    #[serde(alias = "single", alias = "singleChoice")]
    SingleChoice,
    #[serde(alias = "multiple", alias = "multipleChoice")]
    MultipleChoice,
    #[serde(alias = "judge", alias = "trueFalse", alias = "boolean")]
    TrueFalse,
    #[serde(alias = "short", alias = "shortAnswer")]
    ShortAnswer,
    #[serde(alias = "essay")]
    Discussion,
}

impl QuestionType {
    /// Whether questions of this type carry a list of options.
    #[must_use]
    pub const fn expects_options(self) -> bool {
        matches!(
            self,
            Self::SingleChoice | Self::MultipleChoice | Self::TrueFalse
        )
    }

    /// Whether the correct answer may name more than one option.
    #[must_use]
    pub const fn is_multi_answer(self) -> bool {
        matches!(self, Self::MultipleChoice)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SingleChoice => "single_choice",
            Self::MultipleChoice => "multiple_choice",
            Self::TrueFalse => "true_false",
            Self::ShortAnswer => "short_answer",
            Self::Discussion => "discussion",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// OperationKind
// ---------------------------------------------------------------------------

/// Persistence operation the client tries endpoints for.
///
/// Endpoint memory is keyed by this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Fetch,
    Save,
    Delete,
}

impl OperationKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fetch => "fetch",
            Self::Save => "save",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Severity attached to an operator-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DeleteState
// ---------------------------------------------------------------------------

/// Lifecycle of a single delete operation on one question row.
///
/// ```text
/// idle → confirm_pending → idle              (declined)
///                        → settled_success   (ephemeral id, local only)
///                        → dispatching → settled_success
///                                      → settled_failure
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DeleteState {
    Idle,
    ConfirmPending,
    Dispatching,
    SettledSuccess,
    SettledFailure,
}

impl DeleteState {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Idle => &[Self::ConfirmPending],
            Self::ConfirmPending => &[Self::Idle, Self::Dispatching, Self::SettledSuccess],
            Self::Dispatching => &[Self::SettledSuccess, Self::SettledFailure],
            Self::SettledSuccess | Self::SettledFailure => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// Whether the operation has finished.
    #[must_use]
    pub const fn is_settled(self) -> bool {
        matches!(self, Self::SettledSuccess | Self::SettledFailure)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::ConfirmPending => "confirm_pending",
            Self::Dispatching => "dispatching",
            Self::SettledSuccess => "settled_success",
            Self::SettledFailure => "settled_failure",
        }
    }
}

impl fmt::Display for DeleteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
