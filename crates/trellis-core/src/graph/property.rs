use super::ObjectGraph;
use crate::stmt::Ty;

/// How a decoded value is attached to its parent object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyBinding {
    /// Assigned through a settable property of the given name.
    Setter(String),

    /// Passed as the constructor argument at the given position.
    CtorArg(usize),
}

impl PropertyBinding {
    /// The property name, regardless of how the value is attached.
    pub fn name(&self) -> Option<&str> {
        match self {
            PropertyBinding::Setter(name) => Some(name),
            PropertyBinding::CtorArg(_) => None,
        }
    }
}

/// A scalar output property fed by a single column.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleProperty {
    pub binding: PropertyBinding,

    /// Ordinal position in the rendered SELECT list.
    pub column_index: usize,

    /// Positions of the property's multi-valued ancestors, outermost first:
    /// for each collection ancestor, its index among the parent's complex
    /// properties.
    pub index_path: Vec<usize>,

    pub declared_ty: Ty,
}

/// A nested object or collection property.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexProperty {
    pub binding: PropertyBinding,

    /// True for a collection; repeated parent rows are folded by
    /// `key_indices`.
    pub collection: bool,

    /// SELECT-list ordinals of the identity-key chain grouping children
    /// under their parent.
    pub key_indices: Vec<usize>,

    pub graph: ObjectGraph,
}
