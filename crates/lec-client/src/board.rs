//! Rendered question-list state for the chapter on screen.
//!
//! The board is the single owner of "what rows are shown". It keeps three
//! rules:
//! - an empty list is drawn as exactly one empty-state placeholder, never as
//!   an empty row set;
//! - a row that was deleted stays gone even if a stale background refresh
//!   still lists it (deleted ids are tombstoned);
//! - a row that is busy keeps its busy indicator across re-renders, and its
//!   original actions can be restored exactly.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lec_core::entities::QuizQuestion;

use crate::bindings::{ActionHandler, Bindings};
use crate::collaborators::Renderer;

/// An action a row offers to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowAction {
    Edit,
    Delete,
}

/// The action area of a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAffordances {
    Actions(Vec<RowAction>),
    Busy,
}

impl Default for RowAffordances {
    fn default() -> Self {
        Self::Actions(vec![RowAction::Edit, RowAction::Delete])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub question: QuizQuestion,
    pub affordances: RowAffordances,
}

/// Result of removing a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// Row removed; `remaining` rows are still shown.
    Removed { remaining: usize },
    /// No row with that id was shown.
    NotShown,
}

impl Removal {
    /// Whether the list is empty after the removal.
    #[must_use]
    pub const fn left_empty(self) -> bool {
        matches!(self, Self::Removed { remaining: 0 })
    }
}

#[derive(Debug, Default)]
struct BoardState {
    chapter_id: Option<String>,
    rows: Vec<Row>,
    tombstones: HashSet<String>,
}

pub struct QuestionBoard {
    renderer: Box<dyn Renderer>,
    bindings: Bindings,
    action_handler: Mutex<Option<ActionHandler>>,
    state: Mutex<BoardState>,
}

impl std::fmt::Debug for QuestionBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuestionBoard")
            .field("state", &*self.lock())
            .field("bindings", &self.bindings)
            .finish_non_exhaustive()
    }
}

impl QuestionBoard {
    pub fn new(renderer: impl Renderer + 'static) -> Self {
        Self {
            renderer: Box::new(renderer),
            bindings: Bindings::new(),
            action_handler: Mutex::new(None),
            state: Mutex::new(BoardState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BoardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Handler bound to every row that offers actions. Rows are rebound on
    /// the next render.
    pub fn set_action_handler(&self, handler: ActionHandler) {
        *self
            .action_handler
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(handler);
        let state = self.lock();
        self.rebind(&state);
    }

    #[must_use]
    pub const fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Show `questions` as the list for `chapter_id`.
    ///
    /// Logically deleted and tombstoned questions are left out. A row that
    /// is currently busy keeps its busy state. Tombstones only hold for the
    /// chapter they were recorded in.
    pub fn show(&self, chapter_id: Option<&str>, questions: Vec<QuizQuestion>) {
        let mut state = self.lock();
        if state.chapter_id.as_deref() != chapter_id {
            state.tombstones.clear();
        }
        let previous = std::mem::take(&mut state.rows);
        let rows: Vec<Row> = questions
            .into_iter()
            .filter(|q| !q.is_deleted && !state.tombstones.contains(&q.id))
            .map(|question| {
                let affordances = previous
                    .iter()
                    .find(|r| r.question.id == question.id)
                    .map(|r| r.affordances.clone())
                    .unwrap_or_default();
                Row {
                    question,
                    affordances,
                }
            })
            .collect();

        state.chapter_id = chapter_id.map(str::to_string);
        state.rows = rows;
        self.draw(&state);
    }

    /// Remove one row after a confirmed delete.
    ///
    /// When this removes the last row the empty state is drawn explicitly.
    pub fn remove_row(&self, id: &str) -> Removal {
        let mut state = self.lock();
        state.tombstones.insert(id.to_string());
        let before = state.rows.len();
        state.rows.retain(|r| r.question.id != id);
        if state.rows.len() == before {
            return Removal::NotShown;
        }

        self.bindings.unbind_row(id);
        let remaining = state.rows.len();
        if remaining == 0 {
            self.renderer.render_empty(state.chapter_id.as_deref());
        } else {
            self.renderer
                .render_rows(state.chapter_id.as_deref(), &state.rows);
        }
        Removal::Removed { remaining }
    }

    /// Replace a row's actions with the busy indicator. Returns the actions
    /// it had, or `None` if the row is not shown.
    pub fn begin_busy(&self, id: &str) -> Option<RowAffordances> {
        let mut state = self.lock();
        let row = state.rows.iter_mut().find(|r| r.question.id == id)?;
        let original = std::mem::replace(&mut row.affordances, RowAffordances::Busy);
        self.bindings.unbind_row(id);
        self.renderer.update_row(id, &RowAffordances::Busy);
        Some(original)
    }

    /// Put back the actions saved by [`Self::begin_busy`].
    pub fn restore(&self, id: &str, affordances: RowAffordances) {
        let mut state = self.lock();
        let Some(row) = state.rows.iter_mut().find(|r| r.question.id == id) else {
            return;
        };
        row.affordances = affordances;
        self.renderer.update_row(id, &row.affordances);
        self.rebind(&state);
    }

    #[must_use]
    pub fn chapter_id(&self) -> Option<String> {
        self.lock().chapter_id.clone()
    }

    #[must_use]
    pub fn rows(&self) -> Vec<Row> {
        self.lock().rows.clone()
    }

    #[must_use]
    pub fn question(&self, id: &str) -> Option<QuizQuestion> {
        self.lock()
            .rows
            .iter()
            .find(|r| r.question.id == id)
            .map(|r| r.question.clone())
    }

    #[must_use]
    pub fn affordances(&self, id: &str) -> Option<RowAffordances> {
        self.lock()
            .rows
            .iter()
            .find(|r| r.question.id == id)
            .map(|r| r.affordances.clone())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().rows.is_empty()
    }

    fn draw(&self, state: &BoardState) {
        if state.rows.is_empty() {
            self.renderer.render_empty(state.chapter_id.as_deref());
        } else {
            self.renderer
                .render_rows(state.chapter_id.as_deref(), &state.rows);
        }
        self.rebind(state);
    }

    fn rebind(&self, state: &BoardState) {
        let shown: Vec<&str> = state.rows.iter().map(|r| r.question.id.as_str()).collect();
        self.bindings.retain_rows(&shown);

        let handler = self
            .action_handler
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        let Some(handler) = handler else {
            return;
        };
        for row in &state.rows {
            match &row.affordances {
                RowAffordances::Actions(actions) => {
                    self.bindings
                        .bind(&row.question.id, actions, Arc::clone(&handler));
                }
                RowAffordances::Busy => {
                    self.bindings.unbind_row(&row.question.id);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lec_core::enums::QuestionType;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts what is on screen the way a DOM would: one placeholder after
    /// an empty render, one node per row otherwise.
    #[derive(Default, Clone)]
    struct Screen {
        inner: Arc<Mutex<(usize, usize)>>,
    }

    impl Screen {
        fn placeholders(&self) -> usize {
            self.inner.lock().unwrap().0
        }
        fn rows(&self) -> usize {
            self.inner.lock().unwrap().1
        }
    }

    impl Renderer for Screen {
        fn render_rows(&self, _: Option<&str>, rows: &[Row]) {
            *self.inner.lock().unwrap() = (0, rows.len());
        }
        fn render_empty(&self, _: Option<&str>) {
            *self.inner.lock().unwrap() = (1, 0);
        }
        fn update_row(&self, _: &str, _: &RowAffordances) {}
    }

    fn question(id: &str) -> QuizQuestion {
        let mut q = QuizQuestion::draft(QuestionType::ShortAnswer, "Explain", Some("ch-1".into()));
        q.id = id.into();
        q
    }

    #[test]
    fn empty_fetch_draws_one_placeholder() {
        let screen = Screen::default();
        let board = QuestionBoard::new(screen.clone());
        board.show(Some("ch-1"), vec![]);
        assert_eq!(screen.placeholders(), 1);
        assert_eq!(screen.rows(), 0);
    }

    #[test]
    fn removing_last_row_forces_empty_state() {
        let screen = Screen::default();
        let board = QuestionBoard::new(screen.clone());
        board.show(Some("ch-1"), vec![question("a"), question("b")]);
        assert_eq!(board.remove_row("a"), Removal::Removed { remaining: 1 });
        assert_eq!(screen.rows(), 1);
        let removal = board.remove_row("b");
        assert!(removal.left_empty());
        assert_eq!(screen.placeholders(), 1);
        assert_eq!(board.remove_row("b"), Removal::NotShown);
    }

    #[test]
    fn stale_refresh_cannot_resurrect_deleted_row() {
        let screen = Screen::default();
        let board = QuestionBoard::new(screen.clone());
        board.show(Some("ch-1"), vec![question("a")]);
        board.remove_row("a");
        board.show(Some("ch-1"), vec![question("a")]);
        assert!(board.is_empty());
        assert_eq!(screen.placeholders(), 1);
    }

    #[test]
    fn switching_chapter_forgets_tombstones() {
        let board = QuestionBoard::new(Screen::default());
        board.show(Some("ch-1"), vec![question("a")]);
        board.remove_row("a");

        board.show(Some("ch-2"), vec![question("b")]);
        assert!(board.lock().tombstones.is_empty());

        board.show(Some("ch-1"), vec![question("a")]);
        assert_eq!(board.rows().len(), 1);
    }

    #[test]
    fn logically_deleted_questions_are_hidden() {
        let board = QuestionBoard::new(Screen::default());
        let mut gone = question("gone");
        gone.is_deleted = true;
        board.show(Some("ch-1"), vec![gone, question("kept")]);
        let ids: Vec<String> = board.rows().into_iter().map(|r| r.question.id).collect();
        assert_eq!(ids, vec!["kept"]);
    }

    #[test]
    fn busy_state_survives_rerender_and_restores_exactly() {
        let board = QuestionBoard::new(Screen::default());
        board.show(Some("ch-1"), vec![question("a")]);
        let original = board.begin_busy("a").unwrap();
        assert_eq!(original, RowAffordances::default());

        board.show(Some("ch-1"), vec![question("a")]);
        assert_eq!(board.affordances("a"), Some(RowAffordances::Busy));

        board.restore("a", original.clone());
        assert_eq!(board.affordances("a"), Some(original));
    }

    #[test]
    fn rows_are_bound_once_and_busy_rows_are_unbound() {
        let board = QuestionBoard::new(Screen::default());
        let clicks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&clicks);
        board.set_action_handler(Arc::new(move |_: &str, _: RowAction| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        board.show(Some("ch-1"), vec![question("a"), question("b")]);
        board.show(Some("ch-1"), vec![question("a"), question("b")]);
        assert!(board.bindings().trigger("a", RowAction::Delete));
        assert_eq!(clicks.load(Ordering::SeqCst), 1);

        board.begin_busy("b");
        assert!(!board.bindings().trigger("b", RowAction::Delete));

        board.show(Some("ch-1"), vec![question("a")]);
        assert!(!board.bindings().is_bound("b"));
    }
}
