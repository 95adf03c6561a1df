//! Terminal implementations of the console collaborators.

use std::collections::HashMap;
use std::io::{BufRead, Write};
use std::sync::{Mutex, PoisonError};

use lec_client::board::{Row, RowAffordances};
use lec_client::collaborators::{ChapterSource, Confirmer, Notifier, Renderer};
use lec_client::console::{EventSender, UiEvent};
use lec_core::enums::Severity;

use crate::progress::Progress;

/// Prints the list to stdout and shows a spinner while a row is busy.
pub struct TerminalRenderer {
    progress: bool,
    busy: Mutex<HashMap<String, Progress>>,
}

impl TerminalRenderer {
    pub fn new(progress: bool) -> Self {
        Self {
            progress,
            busy: Mutex::new(HashMap::new()),
        }
    }
}

impl Renderer for TerminalRenderer {
    fn render_rows(&self, chapter_id: Option<&str>, rows: &[Row]) {
        println!("{}", chapter_heading(chapter_id, rows.len()));
        for row in rows {
            println!("{}", format_row(row));
        }
    }

    fn render_empty(&self, chapter_id: Option<&str>) {
        println!("{}", chapter_heading(chapter_id, 0));
        println!("  (no questions yet)");
    }

    fn update_row(&self, id: &str, affordances: &RowAffordances) {
        let mut busy = self.busy.lock().unwrap_or_else(PoisonError::into_inner);
        match affordances {
            RowAffordances::Busy => {
                let spinner = Progress::spinner(&format!("working on {id}"), self.progress);
                busy.insert(id.to_string(), spinner);
            }
            RowAffordances::Actions(_) => {
                if let Some(spinner) = busy.remove(id) {
                    spinner.finish_clear();
                }
            }
        }
    }
}

fn chapter_heading(chapter_id: Option<&str>, count: usize) -> String {
    format!(
        "Chapter {}: {count} question(s)",
        chapter_id.unwrap_or("(none)")
    )
}

fn format_row(row: &Row) -> String {
    let q = &row.question;
    let marker = if q.is_ephemeral() { " (unsaved)" } else { "" };
    format!(
        "  {:<24} {:<16} {}{marker}",
        q.id,
        q.question_type.as_str(),
        q.prompt_text
    )
}

/// Writes notifications to stderr. Quiet mode keeps warnings and errors.
pub struct TerminalNotifier {
    quiet: bool,
}

impl TerminalNotifier {
    pub const fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        if self.quiet && matches!(severity, Severity::Info | Severity::Success) {
            return;
        }
        eprintln!("{}", format_notice(message, severity));
    }
}

fn format_notice(message: &str, severity: Severity) -> String {
    let tag = match severity {
        Severity::Info => "info",
        Severity::Success => "ok",
        Severity::Warning => "warning",
        Severity::Error => "error",
    };
    format!("[{tag}] {message}")
}

/// Asks on stderr and reads the answer from stdin. Anything but y/yes is no.
pub struct StdinConfirmer;

impl Confirmer for StdinConfirmer {
    fn confirm(&self, message: &str) -> bool {
        eprint!("{message} [y/N] ");
        let _ = std::io::stderr().flush();
        let mut answer = String::new();
        match std::io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(error) => {
                tracing::warn!(%error, "could not read confirmation");
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// The chapter chosen on the command line. Its change signal queues a
/// reload on the console.
pub struct SelectedChapter {
    chapter_id: String,
    events: EventSender,
}

impl SelectedChapter {
    pub const fn new(chapter_id: String, events: EventSender) -> Self {
        Self { chapter_id, events }
    }
}

impl ChapterSource for SelectedChapter {
    fn current_chapter(&self) -> Option<String> {
        Some(self.chapter_id.clone())
    }

    fn supports_change_signal(&self) -> bool {
        true
    }

    fn emit_change(&self) {
        let reload = UiEvent::Reload {
            chapter_id: self.chapter_id.clone(),
        };
        if self.events.send(reload).is_err() {
            tracing::warn!(chapter_id = %self.chapter_id, "console inbox closed; reload dropped");
        }
    }
}
