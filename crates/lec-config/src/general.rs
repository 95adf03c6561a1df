//! General console configuration.

use serde::{Deserialize, Serialize};

const fn default_confirm_deletes() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Chapter used when a command does not name one.
    #[serde(default)]
    pub default_chapter_id: Option<String>,

    /// Ask before deleting a question.
    #[serde(default = "default_confirm_deletes")]
    pub confirm_deletes: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_chapter_id: None,
            confirm_deletes: default_confirm_deletes(),
        }
    }
}
