//! The library module for `github-switch`.
//!
//! `github-switch` keeps several named identities (display name, email, SSH key) and switches
//! between them by rewriting the managed host's block in the SSH config and the global git identity.
//!
//! The library is intended to be used by the binary in this crate and by its tests;
//! it may exhibit breaking changes in any release.

use std::path::PathBuf;

use derive_new::new;
use error_stack::Report;
use getset::Getters;

pub mod account;
pub mod config;
pub mod debug;
pub mod doc;
pub mod ext;
pub mod git_wrapper;
pub mod key;
pub mod ssh_config;
pub mod subcommand;
pub mod term;

use git_wrapper::Git;
use ssh_config::{ManagedHost, SshConfig};

/// Where the program reads and writes its state, resolved once per invocation.
///
/// Everything that touches the disk is handed this value instead of looking up
/// well-known paths itself, so tests can point it anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
#[getset(get = "pub")]
pub struct AppContext {
    /// The account store file.
    accounts_file: PathBuf,

    /// The directory holding the SSH config file and private keys.
    ssh_dir: PathBuf,

    /// The host whose SSH config block is managed.
    host: ManagedHost,

    /// Overrides git's global config file when set.
    git_config: Option<PathBuf>,
}

impl AppContext {
    /// The SSH config file inside the SSH directory.
    pub fn ssh_config(&self) -> SshConfig {
        SshConfig::new(self.ssh_dir.join("config"), self.host.clone())
    }

    /// The full path of a key filename inside the SSH directory.
    pub fn key_path(&self, key: &str) -> PathBuf {
        self.ssh_dir.join(key)
    }

    /// The git binary, scoped to the configured global config.
    pub fn git(&self) -> Result<Git, Report<git_wrapper::Error>> {
        Git::locate(self.git_config.clone())
    }
}
