//! Implementation for the `switch` subcommand.

use std::io::{BufRead, Write};

use derive_new::new;
use error_stack::{Report, ResultExt};
use tracing::{field, info, warn, Span};

use crate::{
    account::{Profile, Store},
    ext::error_stack::ErrorHelper,
    key,
    term::{self, Terminal},
    AppContext,
};

/// Errors encountered while switching accounts.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The existing store could not be loaded.
    #[error("load account store")]
    LoadAccounts,

    /// There is nothing to switch to.
    #[error("no accounts configured")]
    NoAccounts,

    /// No account with this name is stored.
    #[error("unknown account: {0}")]
    UnknownAccount(String),

    /// The SSH config could not be updated.
    #[error("update SSH config")]
    UpdateSshConfig,

    /// The global git identity could not be updated.
    #[error("update git config")]
    UpdateGitConfig,

    /// Talking to the user failed.
    #[error("interact with terminal")]
    Terminal,
}

/// Arguments for `switch`.
#[derive(Debug, Clone, clap::Args, new)]
pub struct Args {
    /// The account to switch to; if omitted, choose from a menu.
    account: Option<String>,

    /// Skip the confirmation prompt.
    #[arg(short, long)]
    force: bool,

    /// Do not add the key to the running ssh-agent.
    #[arg(long)]
    no_agent: bool,
}

/// Make the account active: point the SSH config at its key,
/// set the global git identity, then offer the key to the agent.
#[tracing::instrument(skip(term), fields(chosen = field::Empty))]
pub fn main<R: BufRead, W: Write>(ctx: &AppContext, term: &mut Terminal<R, W>, args: Args) -> Result<(), Report<Error>> {
    let Args {
        account,
        force,
        no_agent,
    } = args;

    let store = Store::load(ctx.accounts_file()).change_context(Error::LoadAccounts)?;
    if store.is_empty() {
        return Err(Report::new(Error::NoAccounts)).help("use 'github-switch add' to add an account");
    }

    let account = match account {
        Some(account) => account,
        None => {
            let choices = store
                .iter()
                .map(|(name, profile)| (name.to_string(), profile.email().clone()))
                .collect::<Vec<_>>();
            term.select("Select an account:", &choices)
                .change_context(Error::Terminal)?
        }
    };
    Span::current().record("chosen", account.as_str());

    let Some(profile) = store.get(&account) else {
        return Err(Report::new(Error::UnknownAccount(account)))
            .help("run 'github-switch list' to see the configured accounts");
    };

    if !force && !confirm(term, &account, profile).change_context(Error::Terminal)? {
        return term.say("Cancelled.").change_context(Error::Terminal);
    }

    ctx.ssh_config()
        .set_key(profile.key())
        .change_context(Error::UpdateSshConfig)?;

    ctx.git()
        .and_then(|git| git.set_global_identity(profile.name(), profile.email()))
        .change_context(Error::UpdateGitConfig)?;

    if no_agent {
        info!("skipping ssh-agent registration");
    } else if let Err(err) = key::register_with_agent(&ctx.key_path(profile.key())) {
        warn!("failed to add key to ssh-agent: {err:?}");
    }

    term.say(format!("Switched to GitHub account: {account}"))
        .change_context(Error::Terminal)
}

fn confirm<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    account: &str,
    profile: &Profile,
) -> Result<bool, Report<term::Error>> {
    term.say(format!("Switch to account '{account}'?"))?;
    term.say(format!("  Name:    {}", profile.name()))?;
    term.say(format!("  Email:   {}", profile.email()))?;
    term.say(format!("  SSH Key: {}", profile.key()))?;
    term.confirm("\nConfirm?", true)
}
