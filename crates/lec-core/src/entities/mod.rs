//! Entity structs for Lectern domain objects.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema`. Field names
//! go out in camelCase; snake_case spellings are accepted on input because
//! backend revisions have used both.

mod question;

pub use question::{Answer, QuestionOption, QuizQuestion};
