use super::Expr;

/// A singular-dereference marker.
///
/// Wrapping a to-many column reference in `one()` declares that the join
/// yields exactly one related row in this expression context. The marker is
/// an instruction to the compiler, not a runtime operation: the renderer
/// emits a plain scalar column reference instead of an aggregate, and the
/// 1:1 intent never degrades to an arbitrary row pick.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprSingular {
    pub expr: Box<Expr>,
}

impl Expr {
    /// Marks a to-many column reference as scalar-context.
    pub fn one(expr: impl Into<Self>) -> Self {
        ExprSingular {
            expr: Box::new(expr.into()),
        }
        .into()
    }
}

impl From<ExprSingular> for Expr {
    fn from(value: ExprSingular) -> Self {
        Self::Singular(value)
    }
}
