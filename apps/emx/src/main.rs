//! emx - configuration-driven environment-matrix test runner
//!
//! This is the CLI application that ties the pieces together: load the
//! matrix document, resolve the requested environments, run them through
//! the runner while rendering progress events, and map the aggregate
//! outcome to a process exit code.

mod cli;
mod display;
mod error;
mod events;
mod logging;

use crate::cli::Cli;
use crate::display::OutputRenderer;
use crate::error::CliError;
use crate::events::EventHandler;
use clap::Parser;
use emx_runner::{Interrupt, Runner};
use std::process;
use tracing::{error, info};

/// Exit code when at least one environment failed.
const EXIT_ENV_FAILED: i32 = 1;
/// Exit code for configuration or resolution errors (nothing ran).
const EXIT_USAGE: i32 = 2;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.global.debug);

    match run(cli).await {
        Ok(code) => process::exit(code),
        Err(e) => {
            error!("Application error: {}", e);
            eprintln!("Error: {e}");
            process::exit(if e.is_usage_error() { EXIT_USAGE } else { 1 });
        }
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<i32, CliError> {
    info!("Starting emx v{}", env!("CARGO_PKG_VERSION"));

    let model = emx_config::load(&cli.global.config).await?;
    let renderer = OutputRenderer::new(cli.global.json);

    if cli.global.list {
        renderer.render_env_list(&model)?;
        return Ok(0);
    }

    // A resolution failure aborts before any environment executes.
    let specs = emx_resolver::resolve(&model, &cli.envs)?;

    let (event_sender, event_receiver) = emx_events::channel();
    let handler = tokio::spawn(EventHandler::new(cli.global.json).run(event_receiver));

    // One Ctrl-C listener for the whole run; the runner polls the shared
    // flag while commands execute and between them.
    let interrupt = Interrupt::new();
    {
        let interrupt = interrupt.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                interrupt.trigger();
            }
        });
    }

    let runner = Runner::new(std::env::current_dir()?)
        .with_event_sender(event_sender)
        .with_interrupt(interrupt);
    let report = runner.run(&specs, &cli.posargs).await;

    // Dropping the runner closes the channel and lets the handler drain.
    drop(runner);
    let _ = handler.await;

    renderer.render_report(&report)?;
    Ok(if report.success() { 0 } else { EXIT_ENV_FAILED })
}
