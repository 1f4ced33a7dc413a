use super::Error;
use crate::stmt::Value;

/// Error when a row value cannot be converted to the declared output type.
///
/// Raised while decoding result rows, not while compiling. These indicate a
/// schema/mapping mismatch, not a transient fault, and are never retried.
#[derive(Debug)]
pub(super) struct TypeConversionError {
    pub(super) value: Value,
    pub(super) to_type: Box<str>,
}

impl std::error::Error for TypeConversionError {}

impl core::fmt::Display for TypeConversionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "cannot convert {:?} to {}",
            self.value.infer_ty(),
            self.to_type
        )
    }
}

impl Error {
    /// Creates a type conversion error.
    pub fn type_conversion(value: Value, to_type: impl Into<Box<str>>) -> Error {
        Error::from(super::ErrorKind::TypeConversion(TypeConversionError {
            value,
            to_type: to_type.into(),
        }))
    }
}
