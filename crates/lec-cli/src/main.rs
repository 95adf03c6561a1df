use anyhow::Context;
use clap::Parser;

mod app;
mod bootstrap;
mod cli;
mod commands;
mod progress;
mod terminal;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("lec error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    let config = bootstrap::load_config(&flags)?;
    tracing::debug!(base_url = %config.backend.base_url, "configuration loaded");

    let chapter_id = bootstrap::resolve_chapter(cli.command.chapter(), &config)
        .context("no chapter selected")?;
    let mut app = app::App::build(&config, &flags, cli.command.skips_confirmation(), chapter_id)?;

    commands::dispatch(cli.command, &mut app).await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("LECTERN_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
