//! Implementation for the `remove` subcommand.

use std::io::{BufRead, Write};

use derive_new::new;
use error_stack::{Report, ResultExt};
use tracing::info;

use crate::{
    account::{Profile, Store},
    ext::error_stack::ErrorHelper,
    term::{self, Terminal},
    AppContext,
};

/// Errors encountered while removing an account.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The existing store could not be loaded.
    #[error("load account store")]
    LoadAccounts,

    /// No account with this name is stored.
    #[error("account '{0}' not found")]
    UnknownAccount(String),

    /// The updated store could not be written.
    #[error("save account store")]
    SaveAccounts,

    /// Talking to the user failed.
    #[error("interact with terminal")]
    Terminal,
}

/// Arguments for `remove`.
#[derive(Debug, Clone, clap::Args, new)]
pub struct Args {
    /// The account to remove.
    account: String,

    /// Skip the confirmation prompt.
    #[arg(short, long)]
    force: bool,
}

/// Remove an account after confirming with the user.
#[tracing::instrument(skip(term))]
pub fn main<R: BufRead, W: Write>(ctx: &AppContext, term: &mut Terminal<R, W>, args: Args) -> Result<(), Report<Error>> {
    let Args { account, force } = args;

    let mut store = Store::load(ctx.accounts_file()).change_context(Error::LoadAccounts)?;
    let Some(profile) = store.get(&account).cloned() else {
        return Err(Report::new(Error::UnknownAccount(account)))
            .help("run 'github-switch list' to see the configured accounts");
    };

    if !force && !confirm(term, &account, &profile).change_context(Error::Terminal)? {
        return term.say("Cancelled.").change_context(Error::Terminal);
    }

    store.remove(&account);
    store
        .save(ctx.accounts_file())
        .change_context(Error::SaveAccounts)?;
    info!("removed account {account}");

    term.say(format!("Account '{account}' removed."))
        .change_context(Error::Terminal)
}

fn confirm<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    account: &str,
    profile: &Profile,
) -> Result<bool, Report<term::Error>> {
    term.say(format!("Remove account '{account}'?"))?;
    term.say(format!("  Name:    {}", profile.name()))?;
    term.say(format!("  Email:   {}", profile.email()))?;
    term.say(format!("  SSH Key: {}", profile.key()))?;
    term.confirm("\nConfirm?", false)
}
