use std::io::IsTerminal;

use anyhow::Context;
use lec_client::HttpTransport;
use lec_client::board::QuestionBoard;
use lec_client::collaborators::{AlwaysConfirm, Confirmer};
use lec_client::console::{Console, ConsoleParts, event_channel};
use lec_config::LecternConfig;

use crate::cli::GlobalFlags;
use crate::terminal::{SelectedChapter, StdinConfirmer, TerminalNotifier, TerminalRenderer};

/// A console wired to the terminal and the configured backend.
pub struct App {
    pub console: Console<HttpTransport>,
    pub chapter_id: String,
}

impl App {
    pub fn build(
        config: &LecternConfig,
        flags: &GlobalFlags,
        skip_confirmation: bool,
        chapter_id: String,
    ) -> anyhow::Result<Self> {
        let transport =
            HttpTransport::new(&config.backend).context("failed to build HTTP client")?;
        tracing::debug!(base_url = transport.base_url(), "backend transport ready");

        let progress = std::io::stderr().is_terminal() && !flags.quiet;
        let board = QuestionBoard::new(TerminalRenderer::new(progress));

        let confirmer: Box<dyn Confirmer> = if skip_confirmation || !config.general.confirm_deletes {
            Box::new(AlwaysConfirm)
        } else {
            Box::new(StdinConfirmer)
        };

        let (events, inbox) = event_channel();
        let parts = ConsoleParts {
            notifier: Box::new(TerminalNotifier::new(flags.quiet)),
            chapters: Box::new(SelectedChapter::new(chapter_id.clone(), events.clone())),
            confirmer,
            refresh_hook: None,
        };

        Ok(Self {
            console: Console::new(transport, board, parts, (events, inbox)),
            chapter_id,
        })
    }
}
