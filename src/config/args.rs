//! Types and functions for parsing & validating CLI arguments.

use std::path::PathBuf;

use clap::{ArgAction, Args};
use derive_new::new;
use error_stack::{Report, ResultExt};
use getset::CopyGetters;
use tracing::debug;

use crate::{
    ext::{error_stack::DescribeContext, io, result::WrapOk},
    ssh_config::{ManagedHost, DEFAULT_HOST},
    AppContext,
};

/// The account store's filename inside the home directory.
pub const ACCOUNTS_FILE_NAME: &str = ".github-switch.yaml";

/// The SSH directory's name inside the home directory.
pub const SSH_DIR_NAME: &str = ".ssh";

/// Errors that are possibly surfaced during validation of arguments.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A default location depends on the home directory, which could not be found.
    #[error("determine default location for {0}")]
    DefaultLocation(&'static str),

    /// The managed host was empty or contained whitespace.
    #[error("host '{0}' must be a single non-empty host pattern")]
    InvalidHost(String),
}

/// Arguments shared by every subcommand.
/// The "Raw" prefix indicates that this is the initial parsed value before any validation.
///
/// `clap` parses these as part of the top-level options, so there is no failure to parse here;
/// validation resolves defaults that depend on the environment (the home directory).
#[derive(Debug, Clone, Default, Args, new)]
pub struct RawBaseArgs {
    /// The path to the account store.
    ///
    /// If unset, uses `~/.github-switch.yaml`.
    #[arg(long, global = true, env = "GITHUB_SWITCH_ACCOUNTS")]
    accounts_file: Option<PathBuf>,

    /// The directory holding the SSH config file and private keys.
    ///
    /// If unset, uses `~/.ssh`.
    #[arg(long, global = true, env = "GITHUB_SWITCH_SSH_DIR")]
    ssh_dir: Option<PathBuf>,

    /// The host whose block in the SSH config is managed.
    #[arg(long, global = true, env = "GITHUB_SWITCH_HOST", default_value = DEFAULT_HOST)]
    host: Option<String>,

    /// Use this file as git's global config instead of git's default.
    #[arg(long, global = true)]
    git_config: Option<PathBuf>,

    /// Log more detail to stderr; repeat for even more.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

/// How much logging the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct Verbosity {
    /// The number of times `-v` was passed.
    level: u8,
}

impl RawBaseArgs {
    /// The requested verbosity; available before validation so logging can start first.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity { level: self.verbose }
    }

    /// Validate the raw args, filling unset paths from the home directory.
    pub fn validate(self) -> Result<AppContext, Report<Error>> {
        let host = self.host.unwrap_or_else(|| String::from(DEFAULT_HOST));
        if host.is_empty() || host.contains(char::is_whitespace) {
            return Err(Report::new(Error::InvalidHost(host)))
                .describe("the managed block header is 'Host <host>' with exactly one pattern");
        }

        let accounts_file = match self.accounts_file {
            Some(path) => path,
            None => default_in_home(ACCOUNTS_FILE_NAME, "the account store")?,
        };
        let ssh_dir = match self.ssh_dir {
            Some(path) => path,
            None => default_in_home(SSH_DIR_NAME, "the SSH directory")?,
        };

        let ctx = AppContext::new(accounts_file, ssh_dir, ManagedHost::from(host), self.git_config);
        debug!("resolved {ctx:?}");
        ctx.wrap_ok()
    }
}

fn default_in_home(name: &str, what: &'static str) -> Result<PathBuf, Report<Error>> {
    io::home_dir()
        .change_context(Error::DefaultLocation(what))
        .map(|home| home.join(name))
}
