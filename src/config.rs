//! Dev config file regeneration and post-processing.
//!
//! `diagrid dev scaffold` writes the config file; this module deletes any
//! stale copy beforehand and patches the scaffolded YAML afterwards. The
//! post-processing happens in-process with `serde_yaml` and the path is
//! passed in explicitly — no companion script, no environment variable
//! round-trip. Beyond the `apps` entries it touches, the file's schema is
//! opaque and preserved byte-for-meaning.

use std::path::Path;

use anyhow::{Context, Result};
use serde_yaml::Value;

use crate::diagrid::Diagrid;
use crate::error::SetupError;
use crate::output::{OutputContext, progress};

/// Port the quickstart's order application listens on.
const APP_PORT: u64 = 5002;

/// Command used to launch the JavaScript order application.
const APP_COMMAND: [&str; 3] = ["npm", "run", "start"];

/// Regenerate the dev config file at `path`: delete a stale copy, scaffold
/// a fresh one, patch the app entries.
///
/// # Errors
///
/// Returns an error if a stale file cannot be deleted, the scaffold command
/// fails, or the scaffolded file cannot be read back and patched.
pub async fn regenerate<D: Diagrid>(ctx: &OutputContext, diagrid: &D, path: &Path) -> Result<()> {
    remove_stale(ctx, path)?;

    let pb = ctx
        .show_progress()
        .then(|| progress::spinner("Preparing dev config file..."));

    let output = diagrid.dev_scaffold().await?;
    if !output.status.success() {
        if let Some(pb) = &pb {
            progress::finish_fail(pb, "Failed to prepare dev config file");
        }
        return Err(SetupError::command_failed("scaffold dev config", &output).into());
    }

    if let Err(e) = update_dev_config(path) {
        if let Some(pb) = &pb {
            progress::finish_fail(pb, "Failed to update dev config file");
        }
        return Err(e);
    }

    if let Some(pb) = pb {
        progress::finish_ok(&pb, "Dev config file ready");
    }
    Ok(())
}

/// Delete a stale config file ahead of scaffolding. Returns whether a file
/// was deleted; a missing file is not an error and nothing is attempted.
///
/// # Errors
///
/// Returns [`SetupError::ConfigFile`] if an existing file cannot be removed.
pub fn remove_stale(ctx: &OutputContext, path: &Path) -> Result<bool, SetupError> {
    if !path.is_file() {
        return Ok(false);
    }
    ctx.info(&format!("Existing dev config file found: {}", path.display()));
    std::fs::remove_file(path).map_err(|source| SetupError::ConfigFile {
        path: path.to_path_buf(),
        source,
    })?;
    ctx.info(&format!("Deleted existing config file: {}", path.display()));
    Ok(true)
}

/// Point every scaffolded app entry at the quickstart's JavaScript
/// application. Everything else in the document is preserved.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed as YAML, or written
/// back.
pub fn update_dev_config(path: &Path) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading scaffolded config {}", path.display()))?;
    let mut doc: Value = serde_yaml::from_str(&text)
        .with_context(|| format!("parsing scaffolded config {}", path.display()))?;

    if let Some(apps) = doc.get_mut("apps").and_then(Value::as_sequence_mut) {
        for app in apps.iter_mut().filter_map(Value::as_mapping_mut) {
            app.insert(Value::from("appPort"), Value::from(APP_PORT));
            app.insert(
                Value::from("command"),
                Value::Sequence(APP_COMMAND.iter().map(|part| Value::from(*part)).collect()),
            );
        }
    }

    let updated = serde_yaml::to_string(&doc).context("serializing dev config")?;
    std::fs::write(path, updated)
        .with_context(|| format!("writing dev config {}", path.display()))?;
    Ok(())
}
