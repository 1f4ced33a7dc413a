use super::Expr;

/// An IN-list membership test.
///
/// The list side is either a literal [`super::ExprList`] or a parameter
/// flagged for IN-clause fan-out.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprInList {
    pub expr: Box<Expr>,
    pub list: Box<Expr>,
}

impl Expr {
    pub fn in_list(expr: impl Into<Self>, list: impl Into<Self>) -> Self {
        ExprInList {
            expr: Box::new(expr.into()),
            list: Box::new(list.into()),
        }
        .into()
    }
}

impl From<ExprInList> for Expr {
    fn from(value: ExprInList) -> Self {
        Self::InList(value)
    }
}
