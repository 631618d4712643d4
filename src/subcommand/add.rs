//! Implementation for the `add` subcommand.

use std::io::{BufRead, Write};

use derive_new::new;
use error_stack::{Report, ResultExt};
use itertools::Itertools;
use tracing::warn;

use crate::{
    account::{Profile, Store},
    ext::error_stack::{DescribeContext, ErrorHelper},
    key,
    term::Terminal,
    AppContext,
};

/// Errors encountered while adding an account.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The existing store could not be loaded.
    #[error("load account store")]
    LoadAccounts,

    /// An account with this name is already stored.
    #[error("account '{0}' already exists")]
    AccountExists(String),

    /// Not every field was given a value.
    #[error("all fields are required")]
    MissingField,

    /// The key filename cannot be used in the SSH config.
    #[error("invalid SSH key filename")]
    InvalidKey,

    /// The updated store could not be written.
    #[error("save account store")]
    SaveAccounts,

    /// Talking to the user failed.
    #[error("interact with terminal")]
    Terminal,
}

/// Arguments for `add`.
#[derive(Debug, Clone, clap::Args, new)]
pub struct Args {
    /// The name to store the account under.
    account: String,

    /// Git user name for the account.
    #[arg(short, long)]
    name: Option<String>,

    /// Git email address for the account.
    #[arg(short, long)]
    email: Option<String>,

    /// SSH private key filename, relative to the SSH directory.
    #[arg(short = 'k', long = "ssh-key")]
    key: Option<String>,
}

/// Store a new account, asking for any field not passed on the command line.
#[tracing::instrument(skip(term))]
pub fn main<R: BufRead, W: Write>(ctx: &AppContext, term: &mut Terminal<R, W>, args: Args) -> Result<(), Report<Error>> {
    let Args {
        account,
        name,
        email,
        key,
    } = args;

    let mut store = Store::load(ctx.accounts_file()).change_context(Error::LoadAccounts)?;
    if store.get(&account).is_some() {
        return Err(Report::new(Error::AccountExists(account)))
            .help("remove the existing account first with 'github-switch remove'");
    }

    let name = match name {
        Some(name) => name,
        None => term.ask("Git user name: ").change_context(Error::Terminal)?,
    };
    let email = match email {
        Some(email) => email,
        None => term.ask("Git email: ").change_context(Error::Terminal)?,
    };
    let key = match key {
        Some(key) => key,
        None => ask_for_key(ctx, term)?,
    };

    let missing = [("name", &name), ("email", &email), ("ssh-key", &key)]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .join(", ");
    if !missing.is_empty() {
        return Err(Report::new(Error::MissingField)).describe_lazy(|| format!("missing: {missing}"));
    }
    key::validate_filename(&key).change_context(Error::InvalidKey)?;

    store.put(account.clone(), Profile::new(name, email, key));
    store
        .save(ctx.accounts_file())
        .change_context(Error::SaveAccounts)?;

    term.say(format!("Account '{account}' added successfully."))
        .and_then(|_| term.say(format!("Config saved to: {}", ctx.accounts_file().display())))
        .change_context(Error::Terminal)
}

/// Show the likely keys in the SSH directory, then ask for one.
fn ask_for_key<R: BufRead, W: Write>(ctx: &AppContext, term: &mut Terminal<R, W>) -> Result<String, Report<Error>> {
    let candidates = key::candidates(ctx.ssh_dir()).unwrap_or_else(|err| {
        warn!("could not list SSH keys: {err:?}");
        Vec::new()
    });

    if !candidates.is_empty() {
        term.say("Available SSH keys:").change_context(Error::Terminal)?;
        for (number, candidate) in candidates.iter().enumerate() {
            term.say(format!("  {}. {candidate}", number + 1))
                .change_context(Error::Terminal)?;
        }
    }

    term.ask("SSH key filename: ").change_context(Error::Terminal)
}
