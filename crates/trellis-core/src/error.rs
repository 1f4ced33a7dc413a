mod adhoc;
mod configuration;
mod expression_shape;
mod type_conversion;
mod unknown_alias;

use adhoc::AdhocError;
use configuration::ConfigurationError;
use expression_shape::ExpressionShapeError;
use std::sync::Arc;
use type_conversion::TypeConversionError;
use unknown_alias::UnknownAliasError;

/// Returns early with a configuration error built from the format arguments.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Creates an [`Error`] from format arguments.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error raised while building, compiling, or decoding a query.
///
/// All Trellis errors are fatal: compilation either fully succeeds or the
/// entire call fails. There is no retry policy anywhere in the core.
#[derive(Clone)]
pub struct Error {
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Adds context to this error.
    ///
    /// Context is displayed in reverse order: the most recently added context
    /// is shown first, ending with the root cause.
    #[inline(always)]
    pub fn context(self, consequent: Error) -> Error {
        self.context_impl(consequent)
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let mut err = consequent;
        if err.inner.is_none() {
            err = Error::from(ErrorKind::Unknown);
        }
        let inner = err.inner.as_mut().unwrap();
        assert!(
            inner.cause.is_none(),
            "consequent error must not already have a cause"
        );
        Arc::get_mut(inner).unwrap().cause = Some(self);
        err
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.as_ref().and_then(|inner| inner.cause.as_ref())?;
            Some(err)
        }))
    }

    fn kind(&self) -> &ErrorKind {
        self.inner
            .as_ref()
            .map(|inner| &inner.kind)
            .unwrap_or(&ErrorKind::Unknown)
    }

    /// True if the error is a configuration error (bad builder state, unknown
    /// join type, unresolvable table precedence, illegal aggregation mix).
    pub fn is_configuration(&self) -> bool {
        self.chain()
            .any(|err| matches!(err.kind(), ErrorKind::Configuration(_)))
    }

    /// True if the error is an expression-shape error (a condition that does
    /// not reduce to exactly one SQL segment, or a bad IN-parameter binding).
    pub fn is_expression_shape(&self) -> bool {
        self.chain()
            .any(|err| matches!(err.kind(), ErrorKind::ExpressionShape(_)))
    }

    /// True if the error is a type-conversion error raised while decoding a
    /// row value into its declared output type.
    pub fn is_type_conversion(&self) -> bool {
        self.chain()
            .any(|err| matches!(err.kind(), ErrorKind::TypeConversion(_)))
    }

    /// True if the error names an alias that was never registered.
    pub fn is_unknown_alias(&self) -> bool {
        self.chain()
            .any(|err| matches!(err.kind(), ErrorKind::UnknownAlias(_)))
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f.debug_struct("Error").field("kind", &"None").finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    Configuration(ConfigurationError),
    ExpressionShape(ExpressionShapeError),
    TypeConversion(TypeConversionError),
    UnknownAlias(UnknownAliasError),
    Unknown,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            Configuration(err) => core::fmt::Display::fmt(err, f),
            ExpressionShape(err) => core::fmt::Display::fmt(err, f),
            TypeConversion(err) => core::fmt::Display::fmt(err, f),
            UnknownAlias(err) => core::fmt::Display::fmt(err, f),
            Unknown => f.write_str("unknown trellis error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Some(Arc::new(ErrorInner { kind, cause: None })),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_size() {
        // Ensure Error stays at one word (size of pointer/Arc)
        let expected_size = core::mem::size_of::<usize>();
        assert_eq!(expected_size, core::mem::size_of::<Error>());
    }

    #[test]
    fn error_chain_display() {
        let root = Error::from_args(format_args!("root cause"));
        let mid = Error::from_args(format_args!("middle context"));
        let top = Error::from_args(format_args!("top context"));

        let chained = root.context(mid).context(top);
        assert_eq!(
            chained.to_string(),
            "top context: middle context: root cause"
        );
    }

    #[test]
    fn anyhow_bridge() {
        let anyhow_err = anyhow::anyhow!("something failed");
        let our_err: Error = anyhow_err.into();
        assert_eq!(our_err.to_string(), "something failed");
    }

    #[test]
    fn configuration_error() {
        let err = Error::configuration("`from` must be called before `compile`");
        assert!(err.is_configuration());
        assert_eq!(
            err.to_string(),
            "invalid configuration: `from` must be called before `compile`"
        );
    }

    #[test]
    fn expression_shape_error() {
        let err = Error::expression_shape("WHERE", "expected 1 segment, found 2");
        assert!(err.is_expression_shape());
        assert_eq!(
            err.to_string(),
            "invalid WHERE expression: expected 1 segment, found 2"
        );
    }

    #[test]
    fn type_conversion_error() {
        let value = crate::stmt::Value::I64(42);
        let err = Error::type_conversion(value, "String");
        assert!(err.is_type_conversion());
        assert_eq!(err.to_string(), "cannot convert I64 to String");
    }

    #[test]
    fn unknown_alias_error() {
        let err = Error::unknown_alias("table", "pc");
        assert!(err.is_unknown_alias());
        assert_eq!(err.to_string(), "table not found: `pc`");
    }
}
