//! Private keys in the SSH directory: discovery and agent registration.

use std::{
    path::{Path, PathBuf},
    process::Command,
};

use error_stack::{Report, ResultExt};
use tracing::{debug, info};

use crate::ext::{
    error_stack::{DescribeContext, ErrorHelper, IntoContext},
    io,
};

/// Files in the SSH directory that are never private keys.
const NOT_KEYS: [&str; 4] = ["config", "known_hosts", "known_hosts.old", "authorized_keys"];

/// Fragments that suggest a file is a private key.
const KEY_HINTS: [&str; 4] = ["rsa", "ed25519", "ecdsa", "github"];

/// Errors that are possibly surfaced when working with keys.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The SSH directory could not be listed.
    #[error("list SSH directory")]
    List,

    /// The agent registration tool could not be found.
    #[error("locate ssh-add")]
    LocateAgentTool,

    /// The agent registration tool could not be run.
    #[error("run ssh-add")]
    RunAgentTool,

    /// The agent refused the key.
    #[error("add key '{}' to ssh-agent", .0.display())]
    AddToAgent(PathBuf),

    /// The name cannot be written into and read back from an `IdentityFile` directive.
    #[error("'{0}' is not a usable key filename")]
    InvalidFilename(String),
}

/// Whether a filename in the SSH directory looks like a private key.
pub fn looks_like_key(name: &str) -> bool {
    if name.ends_with(".pub") || NOT_KEYS.contains(&name) {
        return false;
    }
    name.starts_with("id_") || KEY_HINTS.iter().any(|hint| name.contains(hint))
}

/// Check that the key filename names a file directly inside the SSH directory
/// and survives being written into an `IdentityFile` directive.
///
/// Rejected: blank names, `.` and `..`, path separators, double quotes, and control characters.
/// Whitespace is allowed; the directive quotes it.
pub fn validate_filename(name: &str) -> Result<(), Report<Error>> {
    let reason = if name.trim().is_empty() {
        Some("the name is blank")
    } else if name == "." || name == ".." {
        Some("the name refers to a directory")
    } else if name.contains('/') {
        Some("the name must not contain '/'")
    } else if name.contains('"') {
        Some("the name must not contain '\"'")
    } else if name.contains(char::is_control) {
        Some("the name must not contain control characters")
    } else {
        None
    };

    match reason {
        None => Ok(()),
        Some(reason) => Err(Report::new(Error::InvalidFilename(name.to_string())))
            .describe(reason)
            .help("give the filename of a private key inside the SSH directory, such as 'id_ed25519_work'"),
    }
}

/// Likely private keys in the SSH directory, sorted by filename.
///
/// A missing directory has no keys.
#[tracing::instrument]
pub fn candidates(ssh_dir: &Path) -> Result<Vec<String>, Report<Error>> {
    if !ssh_dir.is_dir() {
        debug!("no SSH directory at {ssh_dir:?}");
        return Ok(Vec::new());
    }

    let names = io::list_files(ssh_dir).change_context(Error::List)?;
    Ok(names.into_iter().filter(|name| looks_like_key(name)).collect())
}

/// Register the key with the running SSH agent via `ssh-add`.
#[tracing::instrument]
pub fn register_with_agent(key_path: &Path) -> Result<(), Report<Error>> {
    let tool = which::which("ssh-add")
        .context(Error::LocateAgentTool)
        .help("install the OpenSSH client tools, or add the key to your agent manually")?;

    let output = Command::new(tool)
        .arg(key_path)
        .output()
        .context(Error::RunAgentTool)?;

    if output.status.success() {
        info!("added {key_path:?} to ssh-agent");
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    Err(Report::new(Error::AddToAgent(key_path.to_path_buf())))
        .describe_lazy(|| format!("ssh-add exited with {}: {stderr}", output.status))
        .help("make sure ssh-agent is running and the key file exists")
}
