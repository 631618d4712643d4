//! Types and functions for IO actions, wrapped in our errors and semantics.
//!
//! Every command here is a short read-modify-write over a small local file,
//! so these functions are synchronous and read whole files into memory.
//!
//! # Permissions
//!
//! The files managed by this program hold identity information,
//! so on Unix they are always written readable only by the owner (`0600`)
//! and any directory this program creates for them is owner-only (`0700`).

use std::{
    fmt,
    fs::{self, DirBuilder},
    io::{self, Write},
    path::{Path, PathBuf},
};

use error_stack::{Report, ResultExt};
use once_cell::sync::OnceCell;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::ext::{
    error_stack::{DescribeContext, ErrorHelper, IntoContext},
    result::WrapOk,
};

/// Mode bits for files written by this program.
pub const PRIVATE_FILE_MODE: u32 = 0o600;

/// Mode bits for directories created by this program.
pub const PRIVATE_DIR_MODE: u32 = 0o700;

/// Errors that are possibly surfaced during IO actions.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to locate the HOME directory for the current user.
    #[error("locate home directory for the current user")]
    LocateUserHome,

    /// Failed to read the contents of the file at the provided path.
    #[error("read contents of file '{}'", .0.display())]
    ReadFileContent(PathBuf),

    /// Failed to write the contents of the file at the provided path.
    #[error("write contents of file '{}'", .0.display())]
    WriteFileContent(PathBuf),

    /// Failed to create a directory.
    #[error("create directory '{}'", .0.display())]
    CreateDirectory(PathBuf),

    /// Failed to list the contents of a directory.
    #[error("list contents of directory '{}'", .0.display())]
    ListDirectory(PathBuf),
}

/// Look up the user's home directory.
///
/// This function is lazy and memoized:
/// the lookup is performed the first time on demand
/// and (assuming no error was encountered)
/// that result is saved for future invocations.
#[tracing::instrument]
pub fn home_dir() -> Result<&'static PathBuf, Report<Error>> {
    static LAZY: OnceCell<PathBuf> = OnceCell::new();
    LAZY.get_or_try_init(|| {
        debug!("Performing uncached lookup of home directory");
        dirs::home_dir()
            .ok_or(Error::LocateUserHome)
            .map_err(Report::new)
            .describe("on macOS and Linux, this uses the $HOME environment variable or the system call 'getpwuid_r'")
            .help("set $HOME, or pass explicit paths with '--accounts-file' and '--ssh-dir'")
    })
}

/// Reads the provided file content to a string.
///
/// A missing file is not an error: it is reported as `None`,
/// which callers treat as "nothing configured yet".
#[tracing::instrument]
pub fn read_optional<P: AsRef<Path> + fmt::Debug>(path: P) -> Result<Option<String>, Report<Error>> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(content) => Some(content).wrap_ok(),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!("no file at {path:?}, treating as empty");
            Ok(None)
        }
        Err(err) => Err(err)
            .context_lazy(|| Error::ReadFileContent(path.to_path_buf()))
            .help("validate that you have permission to read the file"),
    }
}

/// Create the directory (and any missing parents) with owner-only permissions.
///
/// Directories that already exist are left as they are.
#[tracing::instrument]
pub fn create_private_dir<P: AsRef<Path> + fmt::Debug>(dir: P) -> Result<(), Report<Error>> {
    let dir = dir.as_ref();
    if dir.is_dir() {
        return Ok(());
    }

    let mut builder = DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(PRIVATE_DIR_MODE);
    }

    builder
        .create(dir)
        .context_lazy(|| Error::CreateDirectory(dir.to_path_buf()))
        .help("ensure that you have permission to create this directory")
}

/// Write the file so that it is only readable by its owner.
///
/// The content is written to a temporary file next to the destination,
/// which is then renamed over the destination.
/// If the destination is a symlink, the file it points to is replaced and the link is kept.
/// The parent directory is created with owner-only permissions if missing.
#[tracing::instrument(skip(content))]
pub fn write_private<P: AsRef<Path> + fmt::Debug>(path: P, content: &str) -> Result<(), Report<Error>> {
    let path = path.as_ref();
    let write_err = || Error::WriteFileContent(path.to_path_buf());

    let destination = resolve_symlink(path)
        .context_lazy(write_err)
        .help("ensure that the symlink points at a writable location")?;
    let parent = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    create_private_dir(&parent).change_context_lazy(write_err)?;

    let mut staged = NamedTempFile::new_in(&parent).context_lazy(write_err)?;
    staged.write_all(content.as_bytes()).context_lazy(write_err)?;
    staged.as_file().sync_all().context_lazy(write_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(staged.path(), fs::Permissions::from_mode(PRIVATE_FILE_MODE))
            .context_lazy(write_err)?;
    }

    staged
        .persist(&destination)
        .map_err(|err| err.error)
        .context_lazy(write_err)
        .describe_lazy(|| format!("staged in directory '{}'", parent.display()))
        .help("ensure that you have permission to write files in this directory")?;

    debug!("wrote {} bytes to {destination:?}", content.len());
    Ok(())
}

/// The file a write to `path` should land in.
///
/// Paths that are not symlinks (including paths that do not exist yet) are returned as is.
/// A dangling symlink resolves to the path it names, so the write creates the target.
fn resolve_symlink(path: &Path) -> io::Result<PathBuf> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => match fs::canonicalize(path) {
            Ok(target) => Ok(target),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                let target = fs::read_link(path)?;
                let base = path.parent().unwrap_or_else(|| Path::new("."));
                debug!("{path:?} is a dangling symlink to {target:?}");
                Ok(base.join(target))
            }
            Err(err) => Err(err),
        },
        Ok(_) => Ok(path.to_path_buf()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(path.to_path_buf()),
        Err(err) => Err(err),
    }
}

/// Lists the contents of a directory.
/// Returns the file names of regular files, without their path components, sorted.
#[tracing::instrument]
pub fn list_files(dir: &Path) -> Result<Vec<String>, Report<Error>> {
    let list_err = || Error::ListDirectory(dir.to_path_buf());
    let mut names = Vec::new();
    for entry in fs::read_dir(dir).context_lazy(list_err)? {
        let entry = entry.context_lazy(list_err)?;
        let file_type = entry.file_type().context_lazy(list_err)?;
        if file_type.is_dir() {
            continue;
        }
        names.push(entry.file_name().to_string_lossy().to_string());
    }
    names.sort();
    names.wrap_ok()
}
