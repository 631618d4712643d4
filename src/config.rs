//! Where this program keeps its state, and how that is decided.

use error_stack::{Report, ResultExt};

mod args;

pub use args::{RawBaseArgs, Verbosity, ACCOUNTS_FILE_NAME, SSH_DIR_NAME};

use crate::AppContext;

/// Errors that are possibly surfaced during validation of config values.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Validate CLI arguments
    #[error("validate command line arguments")]
    ValidateArgs,
}

/// Validate the args provided by the user, resolving them into the application context.
pub fn validate_args(provided: RawBaseArgs) -> Result<AppContext, Report<Error>> {
    provided.validate().change_context(Error::ValidateArgs)
}
