//! Extensions to `Result`.

/// Wrap a value into `Ok`, with the error type inferred from the function's return type.
///
/// Reads better than `Ok(...)` at the end of a long chain:
///
/// ```
/// # use github_switch::ext::result::WrapOk;
/// # enum Error {}
/// fn key_path(ssh_dir: &str, key: &str) -> Result<String, Error> {
///     [ssh_dir, key].join("/").wrap_ok()
/// }
/// ```
pub trait WrapOk<T, E> {
    /// Return `Ok(self)`.
    fn wrap_ok(self) -> Result<T, E>;
}

impl<T, E> WrapOk<T, E> for T {
    fn wrap_ok(self) -> Result<T, E> {
        Ok(self)
    }
}
