//! Fakes shared by the integration tests: an in-memory backend and
//! recording page collaborators.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use lec_client::board::{QuestionBoard, Row, RowAffordances};
use lec_client::collaborators::{ChapterSource, Confirmer, Notifier, RefreshHook, Renderer};
use lec_client::console::{Console, ConsoleParts, event_channel};
use lec_client::transport::{Method, Transport, WireRequest, WireResponse};
use lec_client::TransportError;
use lec_core::entities::{Answer, QuestionOption, QuizQuestion};
use lec_core::enums::{QuestionType, Severity};
use tokio::sync::Notify;

pub type Store = HashMap<String, QuizQuestion>;
type Responder = dyn Fn(&WireRequest, &mut Store) -> WireResponse + Send + Sync;

/// In-memory backend. Every request is logged; `respond` decides the reply
/// and may mutate the stored questions.
#[derive(Clone)]
pub struct FakeBackend {
    log: Arc<Mutex<Vec<WireRequest>>>,
    store: Arc<Mutex<Store>>,
    respond: Arc<Responder>,
    fetch_gate: Option<Arc<Notify>>,
}

impl FakeBackend {
    pub fn new(
        respond: impl Fn(&WireRequest, &mut Store) -> WireResponse + Send + Sync + 'static,
    ) -> Self {
        Self {
            log: Arc::new(Mutex::new(Vec::new())),
            store: Arc::new(Mutex::new(HashMap::new())),
            respond: Arc::new(respond),
            fetch_gate: None,
        }
    }

    /// Backend that answers 404 to everything.
    pub fn not_found() -> Self {
        Self::new(|_, _| WireResponse::new(404, r#"{"message":"Not Found"}"#))
    }

    /// GET requests wait on `gate` before they are answered.
    pub fn with_fetch_gate(mut self, gate: Arc<Notify>) -> Self {
        self.fetch_gate = Some(gate);
        self
    }

    pub fn seed(&self, question: QuizQuestion) {
        self.store
            .lock()
            .unwrap()
            .insert(question.id.clone(), question);
    }

    pub fn stored(&self, id: &str) -> Option<QuizQuestion> {
        self.store.lock().unwrap().get(id).cloned()
    }

    pub fn requests(&self) -> Vec<WireRequest> {
        self.log.lock().unwrap().clone()
    }

    pub fn requests_with(&self, method: Method) -> Vec<WireRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method)
            .collect()
    }
}

impl Transport for FakeBackend {
    async fn send(&self, request: &WireRequest) -> Result<WireResponse, TransportError> {
        self.log.lock().unwrap().push(request.clone());
        if request.method == Method::Get {
            if let Some(gate) = &self.fetch_gate {
                gate.notified().await;
            }
        }
        let mut store = self.store.lock().unwrap();
        Ok((self.respond)(request, &mut store))
    }
}

/// What the renderer last drew, counted like DOM nodes.
#[derive(Debug, Default)]
pub struct ScreenState {
    pub placeholders: usize,
    pub row_ids: Vec<String>,
    pub row_updates: Vec<(String, RowAffordances)>,
    pub renders: usize,
}

#[derive(Clone, Default)]
pub struct Screen(pub Arc<Mutex<ScreenState>>);

impl Screen {
    pub fn placeholders(&self) -> usize {
        self.0.lock().unwrap().placeholders
    }

    pub fn row_ids(&self) -> Vec<String> {
        self.0.lock().unwrap().row_ids.clone()
    }

    pub fn row_updates(&self) -> Vec<(String, RowAffordances)> {
        self.0.lock().unwrap().row_updates.clone()
    }
}

impl Renderer for Screen {
    fn render_rows(&self, _chapter_id: Option<&str>, rows: &[Row]) {
        let mut state = self.0.lock().unwrap();
        state.placeholders = 0;
        state.row_ids = rows.iter().map(|r| r.question.id.clone()).collect();
        state.renders += 1;
    }

    fn render_empty(&self, _chapter_id: Option<&str>) {
        let mut state = self.0.lock().unwrap();
        state.placeholders = 1;
        state.row_ids.clear();
        state.renders += 1;
    }

    fn update_row(&self, id: &str, affordances: &RowAffordances) {
        self.0
            .lock()
            .unwrap()
            .row_updates
            .push((id.to_string(), affordances.clone()));
    }
}

#[derive(Clone, Default)]
pub struct Notes(pub Arc<Mutex<Vec<(String, Severity)>>>);

impl Notes {
    pub fn all(&self) -> Vec<(String, Severity)> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.all().iter().filter(|(_, s)| *s == severity).count()
    }
}

impl Notifier for Notes {
    fn notify(&self, message: &str, severity: Severity) {
        self.0.lock().unwrap().push((message.to_string(), severity));
    }
}

#[derive(Clone)]
pub struct Answering {
    pub answer: bool,
    pub asked: Arc<AtomicUsize>,
}

impl Answering {
    pub fn yes() -> Self {
        Self {
            answer: true,
            asked: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn no() -> Self {
        Self {
            answer: false,
            ..Self::yes()
        }
    }

    pub fn asked(&self) -> usize {
        self.asked.load(Ordering::SeqCst)
    }
}

impl Confirmer for Answering {
    fn confirm(&self, _message: &str) -> bool {
        self.asked.fetch_add(1, Ordering::SeqCst);
        self.answer
    }
}

/// Chapter control; optionally supports the synthetic change signal.
#[derive(Clone, Default)]
pub struct Chapter {
    pub selected: Option<String>,
    pub signals: bool,
    pub emitted: Arc<AtomicUsize>,
}

impl Chapter {
    pub fn selected(id: &str) -> Self {
        Self {
            selected: Some(id.to_string()),
            ..Self::default()
        }
    }

    pub fn signaling(id: &str) -> Self {
        Self {
            signals: true,
            ..Self::selected(id)
        }
    }

    pub fn emitted(&self) -> usize {
        self.emitted.load(Ordering::SeqCst)
    }
}

impl ChapterSource for Chapter {
    fn current_chapter(&self) -> Option<String> {
        self.selected.clone()
    }

    fn supports_change_signal(&self) -> bool {
        self.signals
    }

    fn emit_change(&self) {
        self.emitted.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Clone, Default)]
pub struct Hook(pub Arc<Mutex<Vec<String>>>);

impl Hook {
    pub fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl RefreshHook for Hook {
    fn refresh(&self, chapter_id: &str) {
        self.0.lock().unwrap().push(chapter_id.to_string());
    }
}

/// Handles to every fake wired into a console.
pub struct Harness {
    pub console: Console<FakeBackend>,
    pub backend: FakeBackend,
    pub screen: Screen,
    pub notes: Notes,
    pub confirm: Answering,
    pub chapter: Chapter,
}

pub fn harness(backend: FakeBackend, confirm: Answering, chapter: Chapter, hook: Option<Hook>) -> Harness {
    let screen = Screen::default();
    let notes = Notes::default();
    let parts = ConsoleParts {
        notifier: Box::new(notes.clone()),
        chapters: Box::new(chapter.clone()),
        confirmer: Box::new(confirm.clone()),
        refresh_hook: hook.map(|h| Box::new(h) as Box<dyn RefreshHook>),
    };
    let console = Console::new(
        backend.clone(),
        QuestionBoard::new(screen.clone()),
        parts,
        event_channel(),
    );
    Harness {
        console,
        backend,
        screen,
        notes,
        confirm,
        chapter,
    }
}

pub fn persisted(id: &str, chapter: &str) -> QuizQuestion {
    let mut q = single_choice(chapter);
    q.id = id.to_string();
    q
}

pub fn single_choice(chapter: &str) -> QuizQuestion {
    let mut q = QuizQuestion::draft(
        QuestionType::SingleChoice,
        "Which HTTP status means Not Found?",
        Some(chapter.to_string()),
    );
    q.options = vec![
        QuestionOption::new("A", "404"),
        QuestionOption::new("B", "500"),
    ];
    q.correct_answer = Some(Answer::One("A".into()));
    q
}
