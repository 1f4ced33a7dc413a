/// Declared output type of a select column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Ty {
    Bool,
    I32,
    I64,
    F64,
    String,
    Bytes,

    /// The type of a null value; never declared, only inferred.
    Null,

    /// The type of a list parameter; never declared, only inferred.
    List,

    /// A type that also accepts null.
    Nullable(Box<Ty>),
}

impl Ty {
    /// Wraps the type so it accepts null. Already-nullable types are
    /// unchanged.
    pub fn nullable(self) -> Ty {
        match self {
            Ty::Nullable(_) => self,
            ty => Ty::Nullable(Box::new(ty)),
        }
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, Ty::Nullable(_) | Ty::Null)
    }

    /// The type with nullability stripped.
    pub fn base(&self) -> &Ty {
        match self {
            Ty::Nullable(ty) => ty.base(),
            ty => ty,
        }
    }
}

impl core::fmt::Display for Ty {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Ty::Bool => f.write_str("Bool"),
            Ty::I32 => f.write_str("I32"),
            Ty::I64 => f.write_str("I64"),
            Ty::F64 => f.write_str("F64"),
            Ty::String => f.write_str("String"),
            Ty::Bytes => f.write_str("Bytes"),
            Ty::Null => f.write_str("Null"),
            Ty::List => f.write_str("List"),
            Ty::Nullable(ty) => write!(f, "Nullable<{ty}>"),
        }
    }
}
