//! Wrapper for the global git identity (`user.name` and `user.email`).
use std::{
    path::PathBuf,
    process::{Command, Output},
};

use derive_new::new;
use error_stack::{Report, ResultExt};
use itertools::Itertools;
use tracing::debug;

use crate::ext::{
    error_stack::{DescribeContext, ErrorHelper, IntoContext},
    result::WrapOk,
};

/// The git setting holding the commit author name.
pub const USER_NAME: &str = "user.name";

/// The git setting holding the commit author email.
pub const USER_EMAIL: &str = "user.email";

/// Exit code `git config --get` uses for "the key is not set".
const UNSET_EXIT_CODE: i32 = 1;

/// Errors that are encountered while shelling out to git.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The git binary could not be found.
    #[error("locate git")]
    Locate,

    /// We encountered an error while shelling out to git.
    #[error("run git command")]
    RunCommand,

    /// Setting a global value failed.
    #[error("set global git setting '{0}'")]
    Set(&'static str),

    /// Reading a global value failed.
    #[error("read global git setting '{0}'")]
    Get(&'static str),
}

/// The identity git uses for new commits.
#[derive(Debug, Clone, Default, PartialEq, Eq, new)]
pub struct Identity {
    /// The author name; empty if unset.
    pub name: String,
    /// The author email; empty if unset.
    pub email: String,
}

/// A handle to the git binary, scoped to its global configuration.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Git {
    /// Path to the git binary.
    binary: PathBuf,

    /// If set, git reads and writes this file as its global config instead of its default.
    global_config: Option<PathBuf>,
}

impl Git {
    /// Find git on `PATH`.
    #[tracing::instrument]
    pub fn locate(global_config: Option<PathBuf>) -> Result<Self, Report<Error>> {
        which::which("git")
            .context(Error::Locate)
            .help("install git, or make sure it is on your PATH")
            .map(|binary| Self::new(binary, global_config))
    }

    /// Set the global commit identity, writing the name then the email.
    #[tracing::instrument(skip(self))]
    pub fn set_global_identity(&self, name: &str, email: &str) -> Result<(), Report<Error>> {
        self.set(USER_NAME, name)?;
        self.set(USER_EMAIL, email)
    }

    /// Read the global commit identity back; unset values are empty strings.
    #[tracing::instrument(skip(self))]
    pub fn global_identity(&self) -> Result<Identity, Report<Error>> {
        let name = self.get(USER_NAME)?;
        let email = self.get(USER_EMAIL)?;
        Identity::new(name, email).wrap_ok()
    }

    fn set(&self, key: &'static str, value: &str) -> Result<(), Report<Error>> {
        let output = self.run_git(&["config", "--global", key, value]).change_context(Error::Set(key))?;
        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        Err(Report::new(Error::Set(key)))
            .describe_lazy(|| format!("git exited with {}: {stderr}", output.status))
            .help("check that your global git config file is writable")
    }

    fn get(&self, key: &'static str) -> Result<String, Report<Error>> {
        let output = self.run_git(&["config", "--global", "--get", key]).change_context(Error::Get(key))?;
        match output.status.code() {
            Some(0) => String::from_utf8_lossy(&output.stdout).trim().to_string().wrap_ok(),
            Some(UNSET_EXIT_CODE) => {
                debug!("{key} is not set");
                Ok(String::new())
            }
            _ => {
                let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
                Err(Report::new(Error::Get(key)))
                    .describe_lazy(|| format!("git exited with {}: {stderr}", output.status))
            }
        }
    }

    fn run_git(&self, args: &[&str]) -> Result<Output, Report<Error>> {
        let mut command = Command::new(&self.binary);
        command.args(args);
        if let Some(config) = &self.global_config {
            command.env("GIT_CONFIG_GLOBAL", config);
        }

        command
            .output()
            .context(Error::RunCommand)
            .describe_lazy(|| format!("running 'git {}'", args.iter().join(" ")))
    }
}
