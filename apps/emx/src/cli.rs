//! Command line interface definition

use clap::Parser;
use std::path::PathBuf;

/// emx - configuration-driven environment-matrix test runner
#[derive(Parser)]
#[command(name = "emx")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Run named test environments from a matrix document")]
#[command(long_about = None)]
pub struct Cli {
    /// Environments to run (empty = the document's default list)
    pub envs: Vec<String>,

    /// Extra arguments after `--`, substituted for {posargs} in commands
    #[arg(last = true)]
    pub posargs: Vec<String>,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Arguments shared by every invocation
#[derive(Parser)]
pub struct GlobalArgs {
    /// Matrix document to load
    #[arg(long, value_name = "PATH", default_value = "envmatrix.toml")]
    pub config: PathBuf,

    /// List the environments the document defines and exit
    #[arg(long)]
    pub list: bool,

    /// Output the final report in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}
