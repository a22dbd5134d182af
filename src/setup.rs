//! Sequential setup steps: prerequisites, project, App ID, dev config.
//!
//! Each step draws a spinner while it runs and finishes it with ✓ or ✗.
//! Every failure is terminal; the error propagates straight to `main`,
//! which exits 1. There is no rollback of partially created resources.

use std::path::PathBuf;
use std::process::Output;

use anyhow::Result;
use indicatif::ProgressBar;

use crate::command_runner::CommandRunner;
use crate::config;
use crate::diagrid::Diagrid;
use crate::error::SetupError;
use crate::output::{OutputContext, progress};
use crate::provision;

/// App ID created for the quickstart's order application.
pub const APPID_NAME: &str = "order-app";

const NODEJS_INSTRUCTIONS: &str = "\
Node.js and npm must be installed to run the quickstart. Full instructions
can be found on the Node.js web site:

  https://nodejs.org/en/download";

const DIAGRID_INSTRUCTIONS: &str = "\
The diagrid CLI must be installed and on PATH. Installation instructions
can be found in the Catalyst documentation:

  https://docs.diagrid.io/catalyst";

/// Everything [`run`] needs from the command line.
pub struct SetupOptions {
    /// Project to create and set as default.
    pub project_name: String,
    /// Dev config file to regenerate, resolved by the CLI layer.
    pub config_file: PathBuf,
}

/// Run the full setup flow in order.
///
/// # Errors
///
/// Returns the first failing step's error; no later step runs after a
/// failure.
pub async fn run<R, D>(
    ctx: &OutputContext,
    runner: &R,
    diagrid: &D,
    opts: &SetupOptions,
) -> Result<()>
where
    R: CommandRunner,
    D: Diagrid,
{
    check_prerequisites(ctx, runner, diagrid).await?;
    create_project(ctx, diagrid, &opts.project_name).await?;
    set_default_project(ctx, diagrid, &opts.project_name).await?;
    create_appid(ctx, diagrid, &opts.project_name).await?;
    provision::wait_appid_ready(diagrid, &opts.project_name, APPID_NAME, ctx.show_progress())
        .await?;
    config::regenerate(ctx, diagrid, &opts.config_file).await?;

    ctx.success(&format!(
        "Project {} is ready. Dev config: {}",
        opts.project_name,
        opts.config_file.display()
    ));
    Ok(())
}

/// Verify node, npm, and the diagrid CLI are installed, and report their
/// versions.
///
/// # Errors
///
/// Returns [`SetupError::PrerequisiteMissing`] when any tool is absent.
pub async fn check_prerequisites<R, D>(ctx: &OutputContext, runner: &R, diagrid: &D) -> Result<()>
where
    R: CommandRunner,
    D: Diagrid,
{
    let pb = ctx
        .show_progress()
        .then(|| progress::spinner("Checking quickstart prerequisites..."));

    let node = probe(runner.run("node", &["-v"]).await);
    let npm = probe(runner.run("npm", &["-v"]).await);
    let (Some(node), Some(npm)) = (node, npm) else {
        fail(pb.as_ref(), "Missing Node.js toolchain");
        return Err(SetupError::PrerequisiteMissing {
            tool: "Node.js",
            instructions: NODEJS_INSTRUCTIONS,
        }
        .into());
    };

    if probe(diagrid.version().await).is_none() {
        fail(pb.as_ref(), "Missing diagrid CLI");
        return Err(SetupError::PrerequisiteMissing {
            tool: "the diagrid CLI",
            instructions: DIAGRID_INSTRUCTIONS,
        }
        .into());
    }

    if let Some(pb) = pb {
        progress::finish_ok(&pb, "Prerequisites found");
    }
    ctx.kv("Node.js version", node.trim());
    ctx.kv("npm version", npm.trim());
    Ok(())
}

/// Create the Catalyst project with its managed key-value store.
///
/// # Errors
///
/// Returns [`SetupError::CommandFailed`] with captured diagnostics on a
/// non-zero exit.
pub async fn create_project<D: Diagrid>(
    ctx: &OutputContext,
    diagrid: &D,
    project: &str,
) -> Result<()> {
    let pb = ctx
        .show_progress()
        .then(|| progress::spinner(&format!("Creating project {project}...")));
    let output = diagrid.project_create(project).await?;
    if !output.status.success() {
        fail(pb.as_ref(), &format!("Failed to create project {project}"));
        return Err(SetupError::command_failed(&format!("create project {project}"), &output).into());
    }
    if let Some(pb) = pb {
        progress::finish_ok(&pb, &format!("Project {project} created"));
    }
    Ok(())
}

/// Make the freshly created project the CLI default.
///
/// # Errors
///
/// Returns [`SetupError::CommandFailed`] with captured diagnostics on a
/// non-zero exit.
pub async fn set_default_project<D: Diagrid>(
    ctx: &OutputContext,
    diagrid: &D,
    project: &str,
) -> Result<()> {
    let pb = ctx
        .show_progress()
        .then(|| progress::spinner(&format!("Setting default project as {project}...")));
    let output = diagrid.project_use(project).await?;
    if !output.status.success() {
        fail(pb.as_ref(), "Failed to set default project");
        return Err(
            SetupError::command_failed(&format!("set default project {project}"), &output).into(),
        );
    }
    if let Some(pb) = pb {
        progress::finish_ok(&pb, &format!("Default project set to {project}"));
    }
    Ok(())
}

/// Create the quickstart's App ID inside `project`.
///
/// # Errors
///
/// Returns [`SetupError::CommandFailed`] with captured diagnostics on a
/// non-zero exit.
pub async fn create_appid<D: Diagrid>(
    ctx: &OutputContext,
    diagrid: &D,
    project: &str,
) -> Result<()> {
    let pb = ctx
        .show_progress()
        .then(|| progress::spinner(&format!("Creating App ID {APPID_NAME}...")));
    let output = diagrid.appid_create(project, APPID_NAME).await?;
    if !output.status.success() {
        fail(pb.as_ref(), &format!("Failed to create App ID {APPID_NAME}"));
        return Err(
            SetupError::command_failed(&format!("create App ID {APPID_NAME}"), &output).into(),
        );
    }
    if let Some(pb) = pb {
        progress::finish_ok(&pb, &format!("App ID {APPID_NAME} created"));
    }
    Ok(())
}

/// Some(stdout) when a probe both spawned and exited zero.
fn probe(result: Result<Output>) -> Option<String> {
    match result {
        Ok(out) if out.status.success() => Some(String::from_utf8_lossy(&out.stdout).into_owned()),
        _ => None,
    }
}

fn fail(pb: Option<&ProgressBar>, msg: &str) {
    if let Some(pb) = pb {
        progress::finish_fail(pb, msg);
    }
}
