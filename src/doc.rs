//! Build metadata shown to users.

use once_cell::sync::Lazy;
use semver::Version;

/// The name users invoke the program by.
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");

static VERSION: Lazy<Version> =
    Lazy::new(|| Version::parse(env!("CARGO_PKG_VERSION")).unwrap_or_else(|_| Version::new(0, 0, 0)));

/// The crate version.
pub fn crate_version() -> &'static Version {
    &VERSION
}

/// One line naming the program and its version, attached to fatal errors.
pub fn banner() -> String {
    format!("{CRATE_NAME} version: {}", crate_version())
}
