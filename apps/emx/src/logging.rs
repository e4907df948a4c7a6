//! Tracing initialization and event-to-log bridging

use emx_events::{AppEvent, CommandEvent, EnvEvent, GeneralEvent};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--debug` selects the debug level
/// for emx crates.
pub fn init_tracing(debug: bool) {
    let default_filter = if debug {
        "emx=debug,emx_config=debug,emx_resolver=debug,emx_runner=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Mirror an event into the tracing infrastructure with structured fields.
pub fn log_event(event: &AppEvent) {
    match event {
        AppEvent::General(general) => match general {
            GeneralEvent::Warning { message } => warn!("{message}"),
            GeneralEvent::Debug { message } => debug!("{message}"),
        },
        AppEvent::Env(env) => match env {
            EnvEvent::Started { name } => info!(env = %name, "environment started"),
            EnvEvent::InstallingDeps { name, targets } => {
                debug!(env = %name, targets = ?targets, "installing dependencies");
            }
            EnvEvent::DepsInstalled { name } => {
                debug!(env = %name, "dependencies installed");
            }
            EnvEvent::Completed { name, success } => {
                info!(env = %name, success = success, "environment completed");
            }
            EnvEvent::Skipped { name } => info!(env = %name, "environment skipped"),
        },
        AppEvent::Command(command) => match command {
            CommandEvent::Started { env, command } => {
                debug!(env = %env, command = %command, "command started");
            }
            CommandEvent::Completed { env, command, code } => {
                debug!(env = %env, command = %command, code = ?code, "command completed");
            }
        },
    }
}
