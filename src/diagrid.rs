//! Diagrid CLI abstraction — enables test doubles for all `diagrid` commands.

use std::process::Output;

use anyhow::Result;

use crate::command_runner::{
    CommandRunner, DEFAULT_CMD_TIMEOUT, PROJECT_CREATE_TIMEOUT, TokioCommandRunner,
};

/// Abstraction over the diagrid CLI, enabling test doubles.
///
/// Every method maps to one `diagrid` subcommand. An `Err` means the process
/// could not be spawned (tool missing from PATH); a returned [`Output`] with
/// a non-zero status means the command itself failed.
#[allow(async_fn_in_trait)]
pub trait Diagrid {
    /// Run `diagrid project create <name> --deploy-managed-kv`.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be spawned.
    async fn project_create(&self, name: &str) -> Result<Output>;

    /// Run `diagrid project use <name>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be spawned.
    async fn project_use(&self, name: &str) -> Result<Output>;

    /// Run `diagrid appid create -p <project> <appid>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be spawned.
    async fn appid_create(&self, project: &str, appid: &str) -> Result<Output>;

    /// Run `diagrid appid get <appid> -p <project>`.
    ///
    /// Output is free-form text; the provisioning poller scrapes its
    /// `Status:` line.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be spawned.
    async fn appid_get(&self, project: &str, appid: &str) -> Result<Output>;

    /// Run `diagrid dev scaffold`, which writes the dev config file into
    /// the current working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be spawned.
    async fn dev_scaffold(&self) -> Result<Output>;

    /// Run `diagrid version` — used as the prerequisite probe.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be spawned (i.e. diagrid not on PATH).
    async fn version(&self) -> Result<Output>;
}

/// Production implementation — shells out to the `diagrid` binary.
pub struct DiagridCli {
    runner: TokioCommandRunner,
}

impl DiagridCli {
    #[must_use]
    pub fn new() -> Self {
        Self {
            runner: TokioCommandRunner::new(DEFAULT_CMD_TIMEOUT),
        }
    }
}

impl Default for DiagridCli {
    fn default() -> Self {
        Self::new()
    }
}

impl Diagrid for DiagridCli {
    async fn project_create(&self, name: &str) -> Result<Output> {
        self.runner
            .run_with_timeout(
                "diagrid",
                &["project", "create", name, "--deploy-managed-kv"],
                PROJECT_CREATE_TIMEOUT,
            )
            .await
    }

    async fn project_use(&self, name: &str) -> Result<Output> {
        self.runner.run("diagrid", &["project", "use", name]).await
    }

    async fn appid_create(&self, project: &str, appid: &str) -> Result<Output> {
        self.runner
            .run("diagrid", &["appid", "create", "-p", project, appid])
            .await
    }

    async fn appid_get(&self, project: &str, appid: &str) -> Result<Output> {
        self.runner
            .run("diagrid", &["appid", "get", appid, "-p", project])
            .await
    }

    async fn dev_scaffold(&self) -> Result<Output> {
        self.runner.run("diagrid", &["dev", "scaffold"]).await
    }

    async fn version(&self) -> Result<Output> {
        self.runner.run("diagrid", &["version"]).await
    }
}
