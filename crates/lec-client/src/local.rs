//! Page-state storage for questions that have no backend identity yet.
//!
//! Drafts live here until a save succeeds. Removing one never touches the
//! network.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use lec_core::entities::QuizQuestion;
use lec_core::ids;

#[derive(Debug, Default)]
pub struct LocalFallbackStore {
    drafts: Mutex<Vec<QuizQuestion>>,
}

impl LocalFallbackStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<QuizQuestion>> {
        self.drafts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Keep `question` as a draft. A question without an ephemeral id gets
    /// one, since anything held here is by definition not persisted.
    /// Returns the id it is stored under.
    pub fn insert(&self, mut question: QuizQuestion) -> String {
        if !question.is_ephemeral() {
            question.id = ids::new_ephemeral_id();
        }
        let id = question.id.clone();
        let mut drafts = self.lock();
        drafts.retain(|q| q.id != id);
        drafts.push(question);
        id
    }

    /// Drop a draft. Returns it if it was present.
    pub fn remove(&self, id: &str) -> Option<QuizQuestion> {
        let mut drafts = self.lock();
        let index = drafts.iter().position(|q| q.id == id)?;
        Some(drafts.remove(index))
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<QuizQuestion> {
        self.lock().iter().find(|q| q.id == id).cloned()
    }

    /// Drafts attached to `chapter_id`, in insertion order.
    #[must_use]
    pub fn drafts_for(&self, chapter_id: &str) -> Vec<QuizQuestion> {
        self.lock()
            .iter()
            .filter(|q| q.chapter_id.as_deref() == Some(chapter_id))
            .cloned()
            .collect()
    }

    /// Drop the drafts with the given ids; called once a save carrying them
    /// succeeded. Returns how many were dropped.
    pub fn remove_many<'a>(&self, ids: impl IntoIterator<Item = &'a str>) -> usize {
        let ids: HashSet<&str> = ids.into_iter().collect();
        let mut drafts = self.lock();
        let before = drafts.len();
        drafts.retain(|q| !ids.contains(q.id.as_str()));
        before - drafts.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
