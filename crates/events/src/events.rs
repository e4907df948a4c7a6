//! Domain event definitions

use serde::{Deserialize, Serialize};

/// Top-level event type grouping all domains
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", rename_all = "snake_case")]
pub enum AppEvent {
    General(GeneralEvent),
    Env(EnvEvent),
    Command(CommandEvent),
}

/// General utility events for warnings and debug notices
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GeneralEvent {
    Warning { message: String },
    Debug { message: String },
}

/// Environment lifecycle events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EnvEvent {
    /// Execution context acquired, about to install dependencies
    Started { name: String },

    /// Dependency installation began for the named targets
    InstallingDeps { name: String, targets: Vec<String> },

    /// All dependency targets installed
    DepsInstalled { name: String },

    /// Environment finished; `success` is false for any failure kind
    Completed { name: String, success: bool },

    /// Environment was declared disabled and did not run
    Skipped { name: String },
}

/// Command execution events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CommandEvent {
    /// Command spawned inside the environment's context
    Started { env: String, command: String },

    /// Command exited; non-zero `code` fails the environment
    Completed {
        env: String,
        command: String,
        code: Option<i32>,
    },
}
