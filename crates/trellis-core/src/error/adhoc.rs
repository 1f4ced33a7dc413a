use super::Error;

/// Error created from a plain message via `err!` / `bail!`.
#[derive(Debug)]
pub(super) struct AdhocError {
    pub(super) message: Box<str>,
}

impl std::error::Error for AdhocError {}

impl core::fmt::Display for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error {
    /// Creates an error from format arguments.
    ///
    /// Used by the `err!` and `bail!` macros.
    pub fn from_args(args: core::fmt::Arguments<'_>) -> Error {
        Error::from(super::ErrorKind::Adhoc(AdhocError {
            message: match args.as_str() {
                Some(s) => s.into(),
                None => std::fmt::format(args).into(),
            },
        }))
    }
}
