//! CLI argument parsing with clap derive.
//!
//! The surface is deliberately small: two optional flags, both with derived
//! defaults. The config file path is resolved here and handed down
//! explicitly — downstream steps never consult the environment.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;

use crate::command_runner::{DEFAULT_CMD_TIMEOUT, TokioCommandRunner};
use crate::diagrid::DiagridCli;
use crate::output::OutputContext;
use crate::setup::{self, SetupOptions};

/// Bootstrap a Diagrid Catalyst quickstart: project, App ID, dev config.
#[derive(Parser)]
#[command(name = "quickstart-setup")]
pub struct Cli {
    /// Name of the project to create and use. Falls back to the
    /// QUICKSTART_PROJECT_NAME environment variable.
    #[arg(long, env = "QUICKSTART_PROJECT_NAME")]
    pub project_name: Option<String>,

    /// Dev config file to scaffold and update. Defaults to
    /// dev-<project-name>.yaml.
    #[arg(long)]
    pub config_file: Option<PathBuf>,
}

impl Cli {
    /// Execute the full setup flow.
    ///
    /// # Errors
    ///
    /// Returns an error on any failed step; `main` maps it to exit code 1.
    pub async fn run(self) -> Result<()> {
        let Some(project_name) = self.project_name.filter(|name| !name.trim().is_empty()) else {
            bail!("no project name given: pass --project-name or set QUICKSTART_PROJECT_NAME");
        };
        let config_file = self
            .config_file
            .unwrap_or_else(|| PathBuf::from(format!("dev-{project_name}.yaml")));

        let ctx = OutputContext::new();
        let runner = TokioCommandRunner::new(DEFAULT_CMD_TIMEOUT);
        let diagrid = DiagridCli::new();
        setup::run(
            &ctx,
            &runner,
            &diagrid,
            &SetupOptions {
                project_name,
                config_file,
            },
        )
        .await
    }
}
