#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Environment execution for emx
//!
//! The runner takes resolved [`EnvironmentSpec`]s and executes them one at
//! a time: acquire a scoped execution context, filter the process
//! environment down to the allow-list, install declared dependencies, run
//! the declared commands in order, and record the outcome. Failures are
//! scoped to their environment - the next environment always runs, except
//! after an interrupt.

mod command;
mod context;
mod execute;
mod interrupt;
mod variables;

pub use context::ExecutionContext;
pub use interrupt::Interrupt;

use std::path::PathBuf;
use std::time::Instant;

use emx_errors::RunError;
use emx_events::{AppEvent, CommandEvent, EnvEvent, EventEmitter, EventSender};
use emx_types::{EnvFailure, EnvReport, EnvStatus, EnvironmentSpec, RunReport};
use tracing::warn;

/// Sequential executor for resolved environments.
pub struct Runner {
    /// Directory the project under test lives in; commands run here.
    project_dir: PathBuf,
    event_sender: Option<EventSender>,
    interrupt: Interrupt,
}

/// Outcome of a single environment, before it is folded into the report.
struct EnvOutcome {
    failure: Option<EnvFailure>,
    commands_run: usize,
    interrupted: bool,
}

impl EnvOutcome {
    fn success(commands_run: usize) -> Self {
        Self {
            failure: None,
            commands_run,
            interrupted: false,
        }
    }

    fn failed(failure: EnvFailure, commands_run: usize) -> Self {
        Self {
            failure: Some(failure),
            commands_run,
            interrupted: false,
        }
    }

    fn interrupted(commands_run: usize) -> Self {
        Self {
            failure: Some(EnvFailure::Interrupted),
            commands_run,
            interrupted: true,
        }
    }
}

impl EventEmitter for Runner {
    fn event_sender(&self) -> Option<&EventSender> {
        self.event_sender.as_ref()
    }
}

impl Runner {
    /// Create a runner rooted at the project directory.
    #[must_use]
    pub fn new(project_dir: PathBuf) -> Self {
        Self {
            project_dir,
            event_sender: None,
            interrupt: Interrupt::new(),
        }
    }

    /// Attach an event sender for progress reporting.
    #[must_use]
    pub fn with_event_sender(mut self, sender: EventSender) -> Self {
        self.event_sender = Some(sender);
        self
    }

    /// Share an interrupt flag with the runner (the CLI triggers it from
    /// its Ctrl-C listener).
    #[must_use]
    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = interrupt;
        self
    }

    /// Execute the environments in order and collect the aggregate report.
    ///
    /// Environment-level failures are recorded and recovered; an interrupt
    /// stops the run after the current environment's teardown.
    pub async fn run(&self, specs: &[EnvironmentSpec], posargs: &[String]) -> RunReport {
        let mut report = RunReport::new();

        for spec in specs {
            // an interrupt between environments still fails the run
            if self.interrupt.is_triggered() {
                warn!(env = %spec.name, "run interrupted before environment started");
                report.envs.push(EnvReport {
                    name: spec.name.clone(),
                    status: EnvStatus::Failed,
                    failure: Some(EnvFailure::Interrupted),
                    commands_run: 0,
                    duration_ms: 0,
                });
                break;
            }

            if spec.skip {
                self.emit(AppEvent::Env(EnvEvent::Skipped {
                    name: spec.name.clone(),
                }));
                report.envs.push(EnvReport::skipped(&spec.name));
                continue;
            }

            self.emit(AppEvent::Env(EnvEvent::Started {
                name: spec.name.clone(),
            }));
            let started = Instant::now();
            let outcome = self.run_env(spec, posargs).await;
            let success = outcome.failure.is_none();

            self.emit(AppEvent::Env(EnvEvent::Completed {
                name: spec.name.clone(),
                success,
            }));
            report.envs.push(EnvReport {
                name: spec.name.clone(),
                status: if success {
                    EnvStatus::Success
                } else {
                    EnvStatus::Failed
                },
                failure: outcome.failure,
                commands_run: outcome.commands_run,
                duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            });

            if outcome.interrupted {
                warn!(env = %spec.name, "run interrupted, skipping remaining environments");
                break;
            }
        }

        report
    }

    /// Run one environment inside a freshly acquired context.
    ///
    /// The context is dropped (and its directory tree removed) on every
    /// return path.
    async fn run_env(&self, spec: &EnvironmentSpec, posargs: &[String]) -> EnvOutcome {
        let context = match ExecutionContext::create(&spec.name).await {
            Ok(context) => context,
            Err(e) => {
                return EnvOutcome::failed(
                    EnvFailure::ContextSetup {
                        message: e.to_string(),
                    },
                    0,
                );
            }
        };
        let vars = variables::visible_variables(spec, &context);

        if let Some(outcome) = self.install_dependencies(spec, &vars).await {
            return outcome;
        }

        let mut commands_run = 0;
        for line in &spec.commands {
            if self.interrupt.is_triggered() {
                return EnvOutcome::interrupted(commands_run);
            }
            let tokens = match prepare_command(line, posargs, spec, &context) {
                Ok(tokens) => tokens,
                Err(e) => {
                    return EnvOutcome::failed(
                        EnvFailure::Command {
                            command: line.clone(),
                            message: e.to_string(),
                        },
                        commands_run,
                    );
                }
            };
            if tokens.is_empty() {
                continue;
            }

            self.emit(AppEvent::Command(CommandEvent::Started {
                env: spec.name.clone(),
                command: line.clone(),
            }));
            match execute::run_command(&tokens, &vars, &self.project_dir, &self.interrupt).await {
                Ok(code) => {
                    commands_run += 1;
                    self.emit(AppEvent::Command(CommandEvent::Completed {
                        env: spec.name.clone(),
                        command: line.clone(),
                        code,
                    }));
                    if code != Some(0) {
                        let failure = RunError::CommandFailed {
                            command: line.clone(),
                            code,
                        };
                        return EnvOutcome::failed(
                            EnvFailure::Command {
                                command: line.clone(),
                                message: failure.to_string(),
                            },
                            commands_run,
                        );
                    }
                }
                Err(RunError::Interrupted) => {
                    return EnvOutcome::interrupted(commands_run);
                }
                Err(e) => {
                    return EnvOutcome::failed(
                        EnvFailure::Command {
                            command: line.clone(),
                            message: e.to_string(),
                        },
                        commands_run,
                    );
                }
            }
        }

        EnvOutcome::success(commands_run)
    }

    /// Install the environment's dependency targets, if any.
    ///
    /// Returns `Some` when installation failed or was interrupted; the
    /// environment must not proceed to its commands.
    async fn install_dependencies(
        &self,
        spec: &EnvironmentSpec,
        vars: &std::collections::HashMap<String, String>,
    ) -> Option<EnvOutcome> {
        let targets = spec.install_targets();
        if spec.install_command.is_empty() || targets.is_empty() {
            return None;
        }

        self.emit(AppEvent::Env(EnvEvent::InstallingDeps {
            name: spec.name.clone(),
            targets: targets.clone(),
        }));

        for target in &targets {
            let mut tokens = spec.install_command.clone();
            tokens.push(target.clone());
            match execute::run_command(&tokens, vars, &self.project_dir, &self.interrupt).await {
                Ok(Some(0)) => {}
                Ok(code) => {
                    return Some(EnvOutcome::failed(
                        EnvFailure::DependencyInstall {
                            message: format!(
                                "{} {target} exited with code {code:?}",
                                spec.install_command.join(" ")
                            ),
                        },
                        0,
                    ));
                }
                Err(RunError::Interrupted) => {
                    return Some(EnvOutcome::interrupted(0));
                }
                Err(e) => {
                    return Some(EnvOutcome::failed(
                        EnvFailure::DependencyInstall {
                            message: e.to_string(),
                        },
                        0,
                    ));
                }
            }
        }

        self.emit(AppEvent::Env(EnvEvent::DepsInstalled {
            name: spec.name.clone(),
        }));
        None
    }
}

/// Tokenize, substitute, and allow-list-check one command line.
fn prepare_command(
    line: &str,
    posargs: &[String],
    spec: &EnvironmentSpec,
    context: &ExecutionContext,
) -> Result<Vec<String>, RunError> {
    let tokens = command::prepare(line, posargs, context)?;
    if let Some(program) = tokens.first() {
        command::check_external(program, spec, context)?;
    }
    Ok(tokens)
}
