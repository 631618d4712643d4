//! The `github-switch` binary.

#![deny(clippy::unwrap_used)]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![warn(rust_2018_idioms)]

use clap::{Parser, Subcommand};
use error_stack::{fmt::ColorMode, Report, Result, ResultExt};
use github_switch::{
    config, debug,
    doc,
    ext::error_stack::{DescribeContext, ErrorHelper},
    subcommand,
    term::Terminal,
};

#[derive(Debug, thiserror::Error)]
enum Error {
    #[error("determine effective configuration")]
    DetermineEffectiveConfig,

    #[error("a fatal error occurred during internal configuration")]
    InternalSetup,

    #[error("a fatal error occurred at runtime")]
    Runtime,
}

/// Switch between GitHub accounts by modifying SSH config and global git configuration.
///
/// Use 'github-switch switch <account>' to switch accounts,
/// or 'github-switch list' to see available accounts.
#[derive(Debug, Parser)]
#[command(version, about, long_about)]
struct Opts {
    /// Paths and settings shared by every subcommand.
    #[command(flatten)]
    base: config::RawBaseArgs,

    /// The subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Initialize an empty account store.
    Init,

    /// Add a new GitHub account.
    Add(subcommand::add::Args),

    /// Remove a GitHub account.
    #[command(alias = "rm")]
    Remove(subcommand::remove::Args),

    /// List all configured accounts.
    #[command(alias = "ls")]
    List,

    /// Show the current GitHub account.
    Current,

    /// Switch to a GitHub account.
    #[command(alias = "sw")]
    Switch(subcommand::switch::Args),
}

fn main() -> Result<(), Error> {
    // App-wide setup goes here.
    let color = if atty::is(atty::Stream::Stderr) {
        ColorMode::Color
    } else {
        ColorMode::None
    };
    Report::set_color_mode(color);

    let Opts { base, command } = Opts::parse();
    debug::Config::from(base.verbosity())
        .initialize()
        .change_context(Error::InternalSetup)?;

    let ctx = config::validate_args(base)
        .change_context(Error::DetermineEffectiveConfig)
        .help("try running with the '--help' argument to see available options")?;

    // Subcommand routing.
    let mut term = Terminal::stdio();
    match command {
        Commands::Init => subcommand::init::main(&ctx, &mut term).change_context(Error::Runtime),
        Commands::Add(args) => subcommand::add::main(&ctx, &mut term, args).change_context(Error::Runtime),
        Commands::Remove(args) => subcommand::remove::main(&ctx, &mut term, args).change_context(Error::Runtime),
        Commands::List => subcommand::list::main(&ctx, &mut term).change_context(Error::Runtime),
        Commands::Current => subcommand::current::main(&ctx, &mut term).change_context(Error::Runtime),
        Commands::Switch(args) => subcommand::switch::main(&ctx, &mut term, args).change_context(Error::Runtime),
    }
    .describe_lazy(doc::banner)
}
