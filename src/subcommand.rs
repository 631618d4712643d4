//! One module per subcommand.
//!
//! Each module exposes a `main` entrypoint taking the [`crate::AppContext`] and the
//! [`crate::term::Terminal`] it talks to the user through.

pub mod add;
pub mod current;
pub mod init;
pub mod list;
pub mod remove;
pub mod switch;
