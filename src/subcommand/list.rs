//! Implementation for the `list` subcommand.

use std::io::{BufRead, Write};

use colored::Colorize;
use error_stack::{Report, ResultExt};
use tracing::warn;

use crate::{account::Store, term::Terminal, AppContext};

/// Errors encountered while listing accounts.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The existing store could not be loaded.
    #[error("load account store")]
    LoadAccounts,

    /// Output could not be shown.
    #[error("show output")]
    Output,
}

/// Print every account in name order, marking the one whose key is active in the SSH config.
#[tracing::instrument(skip(term))]
pub fn main<R: BufRead, W: Write>(ctx: &AppContext, term: &mut Terminal<R, W>) -> Result<(), Report<Error>> {
    let store = Store::load(ctx.accounts_file()).change_context(Error::LoadAccounts)?;
    if store.is_empty() {
        return term
            .say("No accounts configured. Use 'github-switch add' to add an account.")
            .change_context(Error::Output);
    }

    // The marker is informational; an unreadable SSH config just means nothing is marked.
    let active_key = ctx.ssh_config().current_key().unwrap_or_else(|err| {
        warn!("could not read the active SSH key: {err:?}");
        String::new()
    });

    term.say("Configured accounts:").change_context(Error::Output)?;
    for (name, profile) in store.iter() {
        let is_active = !active_key.is_empty() && profile.key() == &active_key;
        let marker = if is_active { "* ".green().bold().to_string() } else { String::from("  ") };

        let entry = format!(
            "{marker}{name}\n    Email:   {}\n    Name:    {}\n    SSH Key: {}",
            profile.email(),
            profile.name(),
            profile.key(),
        );
        term.say(entry).change_context(Error::Output)?;
    }
    Ok(())
}
