use trellis_core::graph::PropertyBinding;
use trellis_core::stmt::{Expr, Ty};

/// The user-supplied output shape: a projection from the joined query
/// object to nested result objects.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// A scalar leaf fed by one expression.
    Scalar { expr: Expr, ty: Ty },

    /// A nested object populated from the same row as its parent.
    Object { properties: Vec<ProjectedProperty> },

    /// A nested collection; repeated parent rows fold into one parent with
    /// many children.
    Collection {
        properties: Vec<ProjectedProperty>,

        /// The to-many join the collection ranges over, when declared
        /// explicitly; otherwise inferred from the leaves.
        source: Option<String>,
    },
}

/// One named (or constructor-bound) property of an object projection.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedProperty {
    pub binding: PropertyBinding,
    pub projection: Projection,
}

impl Projection {
    pub fn scalar(expr: Expr, ty: Ty) -> Self {
        Self::Scalar { expr, ty }
    }

    pub fn object(properties: Vec<ProjectedProperty>) -> Self {
        Self::Object { properties }
    }

    pub fn collection(properties: Vec<ProjectedProperty>) -> Self {
        Self::Collection {
            properties,
            source: None,
        }
    }

    /// A collection ranging over a declared to-many join.
    pub fn collection_of(source: impl Into<String>, properties: Vec<ProjectedProperty>) -> Self {
        Self::Collection {
            properties,
            source: Some(source.into()),
        }
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, Self::Collection { .. })
    }

    pub(crate) fn properties(&self) -> &[ProjectedProperty] {
        match self {
            Self::Scalar { .. } => &[],
            Self::Object { properties } | Self::Collection { properties, .. } => properties,
        }
    }

    /// Tables represented by this node's own rows: tables referenced
    /// outside aggregate functions by scalar leaves reachable without
    /// crossing a collection boundary. Aggregated references collapse rows
    /// and nested collections group on their own identity, so neither
    /// influences the node's identity.
    pub(crate) fn represented_tables(&self) -> Vec<String> {
        let mut tables = Vec::new();
        self.collect_represented(&mut tables);
        tables
    }

    fn collect_represented(&self, tables: &mut Vec<String>) {
        match self {
            Self::Scalar { expr, .. } => {
                expr.for_each_column(&mut |column, under_aggregate| {
                    if !under_aggregate && !tables.contains(&column.table) {
                        tables.push(column.table.clone());
                    }
                });
            }
            Self::Object { properties } | Self::Collection { properties, .. } => {
                for property in properties {
                    if property.projection.is_collection() {
                        continue;
                    }
                    property.projection.collect_represented(tables);
                }
            }
        }
    }

    /// Visits every scalar leaf expression in projection order.
    pub(crate) fn for_each_leaf(&self, f: &mut impl FnMut(&Expr)) {
        match self {
            Self::Scalar { expr, .. } => f(expr),
            Self::Object { properties } | Self::Collection { properties, .. } => {
                for property in properties {
                    property.projection.for_each_leaf(f);
                }
            }
        }
    }
}

impl ProjectedProperty {
    /// A property assigned through a setter of the given name.
    pub fn setter(name: impl Into<String>, projection: Projection) -> Self {
        Self {
            binding: PropertyBinding::Setter(name.into()),
            projection,
        }
    }

    /// A property passed as the constructor argument at the given position.
    pub fn ctor_arg(position: usize, projection: Projection) -> Self {
        Self {
            binding: PropertyBinding::CtorArg(position),
            projection,
        }
    }

    /// The path segment this property contributes to select-column aliases.
    pub(crate) fn path_segment(&self) -> String {
        match &self.binding {
            PropertyBinding::Setter(name) => name.clone(),
            PropertyBinding::CtorArg(position) => format!("arg{position}"),
        }
    }
}
