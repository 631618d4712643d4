//! Extensions to other libraries are stored here.
//!
//! These are small helpers that make the rest of the code read the same way everywhere:
//! errors carry user-facing context and file IO is wrapped in our error types.

pub mod error_stack;
pub mod io;
pub mod result;
