//! Event handling and progress display

use console::style;
use emx_events::{AppEvent, CommandEvent, EnvEvent, EventReceiver, GeneralEvent};

/// Consumes runner events and renders progress lines to stderr.
pub struct EventHandler {
    /// Suppress progress lines (JSON mode keeps stdout machine-readable
    /// and stderr quiet).
    quiet: bool,
}

impl EventHandler {
    /// Create new event handler
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Drain the event channel until all senders are dropped.
    pub async fn run(self, mut receiver: EventReceiver) {
        while let Some(event) = receiver.recv().await {
            crate::logging::log_event(&event);
            if !self.quiet {
                self.handle_event(&event);
            }
        }
    }

    fn handle_event(&self, event: &AppEvent) {
        match event {
            AppEvent::Env(env_event) => match env_event {
                EnvEvent::Started { name } => {
                    eprintln!("{} {name}", style("▶").cyan());
                }
                EnvEvent::InstallingDeps { name, targets } => {
                    eprintln!(
                        "{} {name}: installing {}",
                        style("⋯").dim(),
                        targets.join(", ")
                    );
                }
                EnvEvent::DepsInstalled { name } => {
                    eprintln!("{} {name}: dependencies ready", style("⋯").dim());
                }
                EnvEvent::Completed { name, success } => {
                    if *success {
                        eprintln!("{} {name}", style("✔").green());
                    } else {
                        eprintln!("{} {name}", style("✘").red());
                    }
                }
                EnvEvent::Skipped { name } => {
                    eprintln!("{} {name} (skipped)", style("–").yellow());
                }
            },
            AppEvent::Command(command_event) => match command_event {
                CommandEvent::Started { env, command } => {
                    eprintln!("{} {env}: {command}", style("$").dim());
                }
                CommandEvent::Completed { env, command, code } => {
                    if *code != Some(0) {
                        eprintln!(
                            "{} {env}: {command} exited with {code:?}",
                            style("!").red()
                        );
                    }
                }
            },
            AppEvent::General(general_event) => match general_event {
                GeneralEvent::Warning { message } => {
                    eprintln!("{} {message}", style("warning:").yellow().bold());
                }
                GeneralEvent::Debug { .. } => {
                    // already bridged into tracing by log_event
                }
            },
        }
    }
}
