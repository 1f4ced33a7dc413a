use super::Ty;
use crate::{Error, Result};

/// A runtime value: a bound parameter or a raw value read from a result row.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Null value
    #[default]
    Null,

    /// Boolean value
    Bool(bool),

    /// Signed 32-bit integer
    I32(i32),

    /// Signed 64-bit integer
    I64(i64),

    /// 64-bit float
    F64(f64),

    /// String value
    String(String),

    /// Raw byte array
    Bytes(Vec<u8>),

    /// A list of values; only valid as a parameter bound to an IN-expansion
    /// marker, never as a row value.
    List(Vec<Value>),
}

impl Value {
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Infers the declared type this value would satisfy.
    pub fn infer_ty(&self) -> Ty {
        match self {
            Self::Null => Ty::Null,
            Self::Bool(_) => Ty::Bool,
            Self::I32(_) => Ty::I32,
            Self::I64(_) => Ty::I64,
            Self::F64(_) => Ty::F64,
            Self::String(_) => Ty::String,
            Self::Bytes(_) => Ty::Bytes,
            Self::List(_) => Ty::List,
        }
    }

    pub fn to_bool(self) -> Result<bool> {
        match self {
            Self::Bool(v) => Ok(v),
            _ => Err(Error::type_conversion(self, "bool")),
        }
    }

    pub fn to_i32(self) -> Result<i32> {
        match self {
            Self::I32(v) => Ok(v),
            _ => Err(Error::type_conversion(self, "i32")),
        }
    }

    pub fn to_i64(self) -> Result<i64> {
        match self {
            Self::I64(v) => Ok(v),
            // Widening from i32 is lossless
            Self::I32(v) => Ok(v as i64),
            _ => Err(Error::type_conversion(self, "i64")),
        }
    }

    pub fn to_f64(self) -> Result<f64> {
        match self {
            Self::F64(v) => Ok(v),
            _ => Err(Error::type_conversion(self, "f64")),
        }
    }

    pub fn to_string(self) -> Result<String> {
        match self {
            Self::String(v) => Ok(v),
            _ => Err(Error::type_conversion(self, "String")),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_list(self) -> Result<Vec<Value>> {
        match self {
            Self::List(v) => Ok(v),
            _ => Err(Error::type_conversion(self, "List")),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::I32(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::I64(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::F64(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_failure_names_types() {
        let err = Value::String("x".into()).to_i64().unwrap_err();
        assert!(err.is_type_conversion());
        assert_eq!(err.to_string(), "cannot convert String to i64");
    }

    #[test]
    fn i32_widens_to_i64() {
        assert_eq!(Value::I32(7).to_i64().unwrap(), 7);
    }
}
