//! Interactive terminal IO: prompts, confirmations, and selection menus.
//!
//! Decisions about what the user typed are made by pure functions
//! ([`resolve_selection`], [`parse_confirmation`]) so that they can be tested
//! without a terminal; [`Terminal`] only moves text in and out.

use std::{
    fmt::Display,
    io::{self, BufRead, StdinLock, Stdout, Write},
};

use error_stack::Report;

use crate::ext::{
    error_stack::{ErrorHelper, IntoContext},
    result::WrapOk,
};

/// Errors that are possibly surfaced while talking to the user.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading from the input failed.
    #[error("read user input")]
    Read,

    /// Writing to the output failed.
    #[error("write output")]
    Write,

    /// The input ended while a choice was still required.
    #[error("input ended before a choice was made")]
    EndOfInput,

    /// The input did not name any of the available choices.
    #[error("'{0}' is not one of the available choices")]
    InvalidSelection(String),

    /// There was nothing to choose from.
    #[error("there are no choices available")]
    NoChoices,
}

/// Resolve what the user typed at a numbered menu into one of the names.
///
/// The input may be the 1-based number shown next to a name, or the name itself
/// (ignoring case). Surrounding whitespace is ignored.
pub fn resolve_selection(input: &str, names: &[String]) -> Result<String, Report<Error>> {
    if names.is_empty() {
        return Err(Report::new(Error::NoChoices));
    }

    let input = input.trim();
    if let Ok(number) = input.parse::<usize>() {
        if let Some(name) = number.checked_sub(1).and_then(|index| names.get(index)) {
            return name.clone().wrap_ok();
        }
    }

    names
        .iter()
        .find(|name| name.eq_ignore_ascii_case(input))
        .cloned()
        .ok_or_else(|| Report::new(Error::InvalidSelection(input.to_string())))
        .help_lazy(|| format!("enter a number from 1 to {}, or an account name", names.len()))
}

/// Interpret a yes/no answer.
///
/// An empty answer takes the default; `y` or `yes` (any case) is yes; anything else is no.
pub fn parse_confirmation(input: &str, default: bool) -> bool {
    match input.trim().to_ascii_lowercase().as_str() {
        "" => default,
        "y" | "yes" => true,
        _ => false,
    }
}

/// A line-oriented terminal.
#[derive(Debug)]
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl Terminal<StdinLock<'static>, Stdout> {
    /// The process's standard input and output.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    /// Create a terminal over the provided input and output.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the terminal, returning its output.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Print a line.
    pub fn say<D: Display>(&mut self, text: D) -> Result<(), Report<Error>> {
        writeln!(self.output, "{text}").context(Error::Write)
    }

    /// Ask a question and return the trimmed answer.
    ///
    /// If the input has ended the answer is empty.
    pub fn ask<D: Display>(&mut self, question: D) -> Result<String, Report<Error>> {
        self.prompt(question)?
            .map(|answer| answer.trim().to_string())
            .unwrap_or_default()
            .wrap_ok()
    }

    /// Ask a yes/no question; an empty answer or ended input takes the default.
    pub fn confirm<D: Display>(&mut self, question: D, default: bool) -> Result<bool, Report<Error>> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        let answer = self.prompt(format!("{question} {hint}: "))?.unwrap_or_default();
        parse_confirmation(&answer, default).wrap_ok()
    }

    /// Show a numbered menu and keep asking until the answer names one of the choices.
    ///
    /// Each choice is a name and a label shown next to it.
    pub fn select(&mut self, heading: &str, choices: &[(String, String)]) -> Result<String, Report<Error>> {
        if choices.is_empty() {
            return Err(Report::new(Error::NoChoices));
        }

        self.say(heading)?;
        for (number, (name, label)) in choices.iter().enumerate() {
            self.say(format!("  {}. {name} ({label})", number + 1))?;
        }

        let names = choices.iter().map(|(name, _)| name.clone()).collect::<Vec<_>>();
        loop {
            let Some(answer) = self.prompt(format!("Enter your choice (1-{}): ", names.len()))? else {
                return Err(Report::new(Error::EndOfInput))
                    .help("run again with an account name to switch without the menu");
            };
            match resolve_selection(&answer, &names) {
                Ok(name) => return Ok(name),
                Err(_) => self.say("Invalid selection. Please try again.")?,
            }
        }
    }

    /// Print the prompt without a newline and read one line; `None` if the input has ended.
    fn prompt<D: Display>(&mut self, prompt: D) -> Result<Option<String>, Report<Error>> {
        write!(self.output, "{prompt}").context(Error::Write)?;
        self.output.flush().context(Error::Write)?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).context(Error::Read)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}
