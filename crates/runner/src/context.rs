//! Scoped execution contexts
//!
//! Each environment runs inside a freshly created temporary directory tree.
//! Teardown is tied to `Drop`, so the filesystem footprint disappears on
//! every exit path - success, failure, and interruption alike.

use std::path::{Path, PathBuf};

use emx_errors::RunError;
use tempfile::TempDir;
use tracing::debug;

/// Per-environment isolated execution context.
///
/// Owns a temp directory with a `bin/` directory (prepended to `PATH` for
/// spawned commands) and a private `tmp/` directory (`TMPDIR`).
pub struct ExecutionContext {
    root: TempDir,
    bin_dir: PathBuf,
    tmp_dir: PathBuf,
}

impl ExecutionContext {
    /// Create the context directory tree for `env_name`.
    ///
    /// # Errors
    ///
    /// Returns `RunError::ContextSetup` when the directories cannot be
    /// created.
    pub async fn create(env_name: &str) -> Result<Self, RunError> {
        let root = tempfile::Builder::new()
            .prefix(&format!("emx-{env_name}-"))
            .tempdir()
            .map_err(|e| RunError::ContextSetup {
                message: e.to_string(),
            })?;

        let bin_dir = root.path().join("bin");
        let tmp_dir = root.path().join("tmp");
        for dir in [&bin_dir, &tmp_dir] {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| RunError::ContextSetup {
                    message: format!("{}: {e}", dir.display()),
                })?;
        }

        debug!(env = env_name, dir = %root.path().display(), "created execution context");
        Ok(Self {
            root,
            bin_dir,
            tmp_dir,
        })
    }

    /// Root directory of the context (the `{envdir}` placeholder).
    #[must_use]
    pub fn env_dir(&self) -> &Path {
        self.root.path()
    }

    /// Executable directory (the `{envbindir}` placeholder).
    #[must_use]
    pub fn bin_dir(&self) -> &Path {
        &self.bin_dir
    }

    /// Private scratch directory, exported as `TMPDIR`.
    #[must_use]
    pub fn tmp_dir(&self) -> &Path {
        &self.tmp_dir
    }
}
