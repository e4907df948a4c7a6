//! Output rendering and formatting

use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use emx_types::{DocumentModel, EnvFailure, EnvStatus, RunReport};
use std::io;

/// Output renderer for CLI results
#[derive(Clone)]
pub struct OutputRenderer {
    /// Use JSON output format
    json_output: bool,
}

impl OutputRenderer {
    /// Create new output renderer
    pub fn new(json_output: bool) -> Self {
        Self { json_output }
    }

    /// Render the final run report
    pub fn render_report(&self, report: &RunReport) -> io::Result<()> {
        if self.json_output {
            let json = serde_json::to_string_pretty(report).map_err(io::Error::other)?;
            println!("{json}");
            return Ok(());
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Environment", "Status", "Commands", "Time", "Detail"]);

        for env in &report.envs {
            let status_cell = match env.status {
                EnvStatus::Success => Cell::new("success").fg(Color::Green),
                EnvStatus::Failed => Cell::new("failed").fg(Color::Red),
                EnvStatus::Skipped => Cell::new("skipped").fg(Color::Yellow),
            };
            table.add_row(vec![
                Cell::new(&env.name),
                status_cell,
                Cell::new(env.commands_run),
                Cell::new(format_duration(env.duration_ms)),
                Cell::new(env.failure.as_ref().map_or(String::new(), failure_detail)),
            ]);
        }
        println!("{table}");

        let failed = report
            .envs
            .iter()
            .filter(|e| e.status == EnvStatus::Failed)
            .count();
        let skipped = report
            .envs
            .iter()
            .filter(|e| e.status == EnvStatus::Skipped)
            .count();
        let succeeded = report.envs.len() - failed - skipped;
        println!("{succeeded} succeeded, {failed} failed, {skipped} skipped");
        Ok(())
    }

    /// Render the environments a document defines
    pub fn render_env_list(&self, model: &DocumentModel) -> io::Result<()> {
        if self.json_output {
            let listing = serde_json::json!({
                "default": model.default,
                "environments": model.envs.keys().collect::<Vec<_>>(),
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&listing).map_err(io::Error::other)?
            );
            return Ok(());
        }

        for name in model.envs.keys() {
            if model.default.contains(name) {
                println!("{name} *");
            } else {
                println!("{name}");
            }
        }
        Ok(())
    }
}

fn failure_detail(failure: &EnvFailure) -> String {
    match failure {
        EnvFailure::DependencyInstall { message } => format!("dependency install: {message}"),
        EnvFailure::Command { command, message } => format!("{command}: {message}"),
        EnvFailure::ContextSetup { message } => format!("context setup: {message}"),
        EnvFailure::Interrupted => "interrupted".to_string(),
    }
}

fn format_duration(ms: u64) -> String {
    if ms >= 1000 {
        format!("{:.1}s", ms as f64 / 1000.0)
    } else {
        format!("{ms}ms")
    }
}
