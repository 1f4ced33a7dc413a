use super::Expr;

/// A reference to a column of a joined table, addressed by table alias.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprColumn {
    /// Alias of the table the column belongs to.
    pub table: String,

    /// Column name within the table.
    pub name: String,
}

impl Expr {
    pub fn column(table: impl Into<String>, name: impl Into<String>) -> Self {
        ExprColumn {
            table: table.into(),
            name: name.into(),
        }
        .into()
    }
}

impl From<ExprColumn> for Expr {
    fn from(value: ExprColumn) -> Self {
        Self::Column(value)
    }
}
