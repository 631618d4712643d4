//! Implementation for the `init` subcommand.

use std::io::{BufRead, Write};

use error_stack::{Report, ResultExt};
use indoc::formatdoc;
use tracing::info;

use crate::{account::Store, ext::error_stack::ErrorHelper, term::Terminal, AppContext};

/// Errors encountered during init.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The existing store could not be loaded.
    #[error("load account store")]
    LoadAccounts,

    /// Writing the store file did not work.
    #[error("write account store")]
    SaveAccounts,

    /// Output could not be shown.
    #[error("show output")]
    Output,
}

/// Create an empty account store, unless one with accounts already exists.
#[tracing::instrument(skip(term))]
pub fn main<R: BufRead, W: Write>(ctx: &AppContext, term: &mut Terminal<R, W>) -> Result<(), Report<Error>> {
    let store = Store::load(ctx.accounts_file()).change_context(Error::LoadAccounts)?;

    if !store.is_empty() {
        term.say("Config already exists with accounts:").change_context(Error::Output)?;
        for name in store.names() {
            term.say(format!("  - {name}")).change_context(Error::Output)?;
        }
        term.say("\nUse 'github-switch add' to add more accounts.")
            .change_context(Error::Output)?;
        return Ok(());
    }

    store
        .save(ctx.accounts_file())
        .change_context(Error::SaveAccounts)
        .help("ensure that you can create files next to the account store, or pass '--accounts-file'")?;
    info!("initialized account store at {:?}", ctx.accounts_file());

    let output = formatdoc! {"
        Config initialized at: {path}

        Use 'github-switch add <account-name>' to add your first account.",
        path = ctx.accounts_file().display(),
    };
    term.say(output).change_context(Error::Output)
}
