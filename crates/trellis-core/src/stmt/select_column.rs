use super::Ty;

/// One column in the rendered SELECT list.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectColumn {
    /// Unique alias within the select list.
    pub alias: String,

    /// The rendered source expression, e.g. a quoted column reference or an
    /// aggregate call.
    pub sql: String,

    /// Declared output type.
    pub ty: Ty,

    /// Owning table alias; `None` for constants and computed expressions
    /// with no single source table.
    pub table: Option<String>,

    /// True for synthesized row-identity columns.
    pub row_identity: bool,

    /// True if the value is computed inside an aggregate function.
    pub aggregated: bool,

    /// Constructor-argument position, when the mapped property is populated
    /// through a constructor rather than a settable property.
    pub ctor_arg: Option<usize>,
}

impl SelectColumn {
    /// A plain data column owned by a table.
    pub fn data(
        alias: impl Into<String>,
        sql: impl Into<String>,
        ty: Ty,
        table: Option<String>,
    ) -> Self {
        Self {
            alias: alias.into(),
            sql: sql.into(),
            ty,
            table,
            row_identity: false,
            aggregated: false,
            ctor_arg: None,
        }
    }

    /// A synthesized row-identity column for `table`.
    pub fn row_identity(alias: impl Into<String>, sql: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            sql: sql.into(),
            ty: Ty::I64,
            table: Some(table.into()),
            row_identity: true,
            aggregated: false,
            ctor_arg: None,
        }
    }
}
