//! Report type definitions for a matrix run

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Final status of one environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvStatus {
    Success,
    Failed,
    Skipped,
}

/// Why an environment failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EnvFailure {
    /// Dependency installation failed; no commands were attempted.
    DependencyInstall { message: String },
    /// A declared command exited non-zero or could not be prepared.
    Command { command: String, message: String },
    /// The execution context could not be created.
    ContextSetup { message: String },
    /// The run was interrupted while this environment was executing.
    Interrupted,
}

/// Per-environment outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvReport {
    pub name: String,
    pub status: EnvStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<EnvFailure>,
    /// Commands that ran to completion (successfully or not).
    pub commands_run: usize,
    pub duration_ms: u64,
}

impl EnvReport {
    #[must_use]
    pub fn skipped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: EnvStatus::Skipped,
            failure: None,
            commands_run: 0,
            duration_ms: 0,
        }
    }
}

/// Aggregate outcome of a matrix run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Wall-clock start of the run.
    pub started: DateTime<Utc>,
    /// Per-environment reports, in execution order.
    pub envs: Vec<EnvReport>,
}

impl RunReport {
    #[must_use]
    pub fn new() -> Self {
        Self {
            started: Utc::now(),
            envs: Vec::new(),
        }
    }

    /// True when no environment failed. Skipped environments do not count
    /// against the aggregate.
    #[must_use]
    pub fn success(&self) -> bool {
        self.envs.iter().all(|e| e.status != EnvStatus::Failed)
    }
}

impl Default for RunReport {
    fn default() -> Self {
        Self::new()
    }
}
