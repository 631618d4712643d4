//! Covers logging and tracing.
//!
//! Everything is logged to stderr so that stdout stays reserved for command output.
//! By default only warnings are shown; each `-v` raises the level by one step.

use error_stack::{Report, ResultExt};
use tracing_subscriber::{filter::LevelFilter, fmt::format::FmtSpan, prelude::*, Registry};

use crate::{
    config::Verbosity,
    ext::error_stack::{DescribeContext, ErrorHelper, IntoContext},
};

/// Errors that are possibly surfaced when running debugging operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// When the trace sink is initialized, it is initialized as a global singleton.
    /// Future attempts to initialize it result in this error.
    /// This is a program logic error ("a bug"), and cannot be resolved by users.
    #[error("trace sink was configured again after being configured once")]
    TraceSinkReconfigured,
}

/// Validated config values for observability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    level: LevelFilter,
}

impl From<Verbosity> for Config {
    fn from(verbosity: Verbosity) -> Self {
        let level = match verbosity.level() {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        };
        Self { level }
    }
}

impl Config {
    /// The most detailed level that will be logged.
    pub fn level(&self) -> LevelFilter {
        self.level
    }

    /// Initialize the global tracing subscriber, logging to stderr.
    ///
    /// Until this method is run, traces are not output anywhere and are lost forever;
    /// run it as soon as possible.
    pub fn initialize(&self) -> Result<(), Report<Error>> {
        let span_events = if self.level == LevelFilter::TRACE {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        let subscriber = Registry::default().with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_span_events(span_events)
                .with_filter(self.level),
        );

        tracing::subscriber::set_global_default(subscriber)
            .context(Error::TraceSinkReconfigured)
            .help("if you're a user and you're seeing this, please report this as a defect")
            .describe("this is a program bug and is not something that users can fix")
    }
}
