//! Interactions with the SSH client config file (`~/.ssh/config`).
//!
//! Only the block whose header is exactly `Host <managed host>` is ever touched;
//! every other block, comment, blank line and indentation style passes through unchanged.
//!
//! The text transformations ([`ManagedHost::apply`] and [`ManagedHost::current_key`]) are pure;
//! [`SshConfig`] wraps them with reading and writing the file on disk.

use std::path::PathBuf;

use derive_more::{AsRef, Display, From};
use derive_new::new;
use error_stack::{Report, ResultExt};
use getset::Getters;
use tracing::info;

use crate::ext::{error_stack::DescribeContext, io};

pub mod line;
mod patch;
mod read;

pub use patch::{identity_directive, CAPABILITIES};

/// The host whose block is managed by default.
pub const DEFAULT_HOST: &str = "github.com";

/// Errors that are possibly surfaced when reading or writing the SSH config file.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The file exists but could not be read.
    #[error("read SSH config")]
    Read,

    /// The updated file could not be written.
    #[error("write SSH config")]
    Write,
}

/// The single host pattern whose block this program owns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, AsRef, Display, From)]
pub struct ManagedHost(String);

impl Default for ManagedHost {
    fn default() -> Self {
        Self(String::from(DEFAULT_HOST))
    }
}

impl ManagedHost {
    /// The header line that opens the managed block.
    pub fn header(&self) -> String {
        format!("Host {}", self.0)
    }

    /// Whether the line is the managed block's header.
    ///
    /// The whole trimmed line must equal the header, ignoring case;
    /// `Host github.com gitlab.com` or `Host github.com.example` do not match.
    pub fn is_header(&self, line: &line::Line<'_>) -> bool {
        line.content().eq_ignore_ascii_case(&self.header())
    }
}

/// Produce new file text in which the default managed host selects `key`.
///
/// See [`ManagedHost::apply`].
pub fn apply(text: &str, key: &str) -> String {
    ManagedHost::default().apply(text, key)
}

/// The key filename selected for the default managed host, or an empty string.
///
/// See [`ManagedHost::current_key`].
pub fn current_key(text: &str) -> String {
    ManagedHost::default().current_key(text)
}

/// The SSH config file on disk.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
#[getset(get = "pub")]
pub struct SshConfig {
    /// Location of the file.
    path: PathBuf,

    /// The host whose block is managed.
    host: ManagedHost,
}

impl SshConfig {
    /// The key filename currently selected for the managed host.
    ///
    /// A missing file means nothing is configured yet and reads as an empty string.
    #[tracing::instrument]
    pub fn current_key(&self) -> Result<String, Report<Error>> {
        let content = io::read_optional(&self.path)
            .change_context(Error::Read)
            .describe_lazy(|| format!("looking for the '{}' block", self.host.header()))?;

        Ok(content
            .map(|text| self.host.current_key(&text))
            .unwrap_or_default())
    }

    /// Point the managed host at the key filename, creating the file if needed.
    #[tracing::instrument]
    pub fn set_key(&self, key: &str) -> Result<(), Report<Error>> {
        let existing = io::read_optional(&self.path).change_context(Error::Read)?;
        let updated = match existing {
            Some(text) => self.host.apply(&text, key),
            None => {
                info!("creating SSH config at {:?}", self.path);
                self.host.fresh(key)
            }
        };

        io::write_private(&self.path, &updated)
            .change_context(Error::Write)
            .describe_lazy(|| format!("selecting key '{key}' for '{}'", self.host))
    }
}
