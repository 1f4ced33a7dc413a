use super::Error;

/// Error raised when the query builder is in an invalid state.
///
/// Covers: compiling without a primary table, combining an inner query with
/// an outer WHERE/JOIN/ORDER BY, unresolvable table precedence, and mixing
/// aggregated and non-aggregated use of the same table in one projection.
#[derive(Debug)]
pub(super) struct ConfigurationError {
    pub(super) message: Box<str>,
}

impl std::error::Error for ConfigurationError {}

impl core::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid configuration: {}", self.message)
    }
}

impl Error {
    /// Creates a configuration error.
    ///
    /// Configuration errors are fatal and surfaced at build/compile time,
    /// never retried.
    pub fn configuration(message: impl Into<Box<str>>) -> Error {
        Error::from(super::ErrorKind::Configuration(ConfigurationError {
            message: message.into(),
        }))
    }
}
