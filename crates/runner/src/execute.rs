//! Process spawning inside an execution context
//!
//! Commands run with a fully replaced environment (the filtered variable
//! set) and block the runner until they exit. The run-wide interrupt flag
//! is polled alongside the child; when it fires the child is killed and
//! the command surfaces `RunError::Interrupted` so the caller can tear
//! the context down.

use std::collections::HashMap;
use std::path::Path;
use std::process::Stdio;

use emx_errors::RunError;
use tokio::process::Command;
use tracing::debug;

use crate::interrupt::Interrupt;

/// Spawn `tokens` with exactly `vars` visible, blocking until exit.
///
/// Returns the child's exit code; `None` means it died to a signal.
///
/// # Errors
///
/// Returns `RunError::SpawnFailed` when the program cannot be started and
/// `RunError::Interrupted` when the run's interrupt flag fires first.
pub async fn run_command(
    tokens: &[String],
    vars: &HashMap<String, String>,
    working_dir: &Path,
    interrupt: &Interrupt,
) -> Result<Option<i32>, RunError> {
    let (program, args) = tokens
        .split_first()
        .ok_or_else(|| RunError::SpawnFailed {
            command: String::new(),
            message: "empty command".to_string(),
        })?;

    debug!(command = %tokens.join(" "), cwd = %working_dir.display(), "spawning command");

    let mut child = Command::new(program)
        .args(args)
        .env_clear()
        .envs(vars)
        .current_dir(working_dir)
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| RunError::SpawnFailed {
            command: tokens.join(" "),
            message: e.to_string(),
        })?;

    tokio::select! {
        status = child.wait() => {
            let status = status.map_err(|e| RunError::SpawnFailed {
                command: tokens.join(" "),
                message: e.to_string(),
            })?;
            Ok(status.code())
        }
        () = interrupt.triggered() => {
            let _ = child.kill().await;
            Err(RunError::Interrupted)
        }
    }
}
