use super::Expr;

/// A comma list of expressions, e.g. the literal side of an IN test.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExprList {
    pub items: Vec<Expr>,
}

impl Expr {
    pub fn list(items: impl IntoIterator<Item = impl Into<Expr>>) -> Self {
        ExprList {
            items: items.into_iter().map(Into::into).collect(),
        }
        .into()
    }
}

impl From<ExprList> for Expr {
    fn from(value: ExprList) -> Self {
        Self::List(value)
    }
}
