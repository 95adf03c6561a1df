use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for the `lec` binary.
#[derive(Debug, Parser)]
#[command(name = "lec", version, about = "Lectern - chapter quiz question console")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Explicit config file, layered above the user and project files
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Quiet mode (only errors and the list itself)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            config: self.config.clone(),
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}

/// Global flags available before or after subcommands.
#[derive(Clone, Debug, Default)]
pub struct GlobalFlags {
    pub config: Option<PathBuf>,
    pub quiet: bool,
    pub verbose: bool,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Show the questions of a chapter.
    List(ListArgs),
    /// Save questions from a JSON file into a chapter.
    Save(SaveArgs),
    /// Delete one question.
    Delete(DeleteArgs),
}

impl Commands {
    /// Chapter given on the command line, if any.
    #[must_use]
    pub fn chapter(&self) -> Option<&str> {
        match self {
            Self::List(args) => args.chapter.as_deref(),
            Self::Save(args) => args.chapter.as_deref(),
            Self::Delete(args) => args.chapter.as_deref(),
        }
    }

    #[must_use]
    pub const fn skips_confirmation(&self) -> bool {
        matches!(self, Self::Delete(DeleteArgs { yes: true, .. }))
    }
}

#[derive(Clone, Debug, Args)]
pub struct ListArgs {
    /// Chapter id (defaults to general.default_chapter_id)
    #[arg(long)]
    pub chapter: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct SaveArgs {
    /// JSON file: an array of questions or an object with a `questions` array
    #[arg(short, long)]
    pub file: PathBuf,

    /// Chapter id (defaults to general.default_chapter_id)
    #[arg(long)]
    pub chapter: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct DeleteArgs {
    /// Question id
    pub id: String,

    /// Chapter id (defaults to general.default_chapter_id)
    #[arg(long)]
    pub chapter: Option<String>,

    /// Do not ask for confirmation
    #[arg(short, long)]
    pub yes: bool,
}
