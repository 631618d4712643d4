//! Implementation for the `current` subcommand.

use std::io::{BufRead, Write};

use error_stack::{Report, ResultExt};
use indoc::formatdoc;

use crate::{account::Store, term::Terminal, AppContext};

/// Errors encountered while showing the current account.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The live git identity could not be read.
    #[error("read current git identity")]
    GitIdentity,

    /// The live SSH key could not be read.
    #[error("read current SSH key")]
    SshKey,

    /// The existing store could not be loaded.
    #[error("load account store")]
    LoadAccounts,

    /// Output could not be shown.
    #[error("show output")]
    Output,
}

/// Print the live identity and the stored account it matches, if any.
///
/// An account matches when its key equals the live SSH key or its email equals the live git email.
/// When several accounts match, the first by account name is reported.
#[tracing::instrument(skip(term))]
pub fn main<R: BufRead, W: Write>(ctx: &AppContext, term: &mut Terminal<R, W>) -> Result<(), Report<Error>> {
    let identity = ctx
        .git()
        .and_then(|git| git.global_identity())
        .change_context(Error::GitIdentity)?;
    let key = ctx.ssh_config().current_key().change_context(Error::SshKey)?;
    let store = Store::load(ctx.accounts_file()).change_context(Error::LoadAccounts)?;

    let matched = match store.find_active(&key, &identity.email) {
        Some(account) => format!("Matched account: {account}"),
        None => String::from("No matching account found in configuration."),
    };

    let output = formatdoc! {"
        Current configuration:
          Name:    {name}
          Email:   {email}
          SSH Key: {key}

        {matched}",
        name = identity.name,
        email = identity.email,
    };
    term.say(output).change_context(Error::Output)
}
