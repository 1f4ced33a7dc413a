use super::Expr;

/// One WHEN/THEN arm of a CASE expression.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseArm {
    pub when: Expr,
    pub then: Expr,
}

/// A CASE expression.
///
/// With an operand this is a simple CASE (`CASE x WHEN a THEN … END`);
/// without one it is a searched CASE (`CASE WHEN cond THEN … END`).
#[derive(Debug, Clone, PartialEq)]
pub struct ExprCase {
    pub operand: Option<Box<Expr>>,
    pub arms: Vec<CaseArm>,
    pub otherwise: Option<Box<Expr>>,
}

impl Expr {
    /// A searched CASE expression.
    pub fn case(arms: Vec<CaseArm>, otherwise: Option<Expr>) -> Self {
        ExprCase {
            operand: None,
            arms,
            otherwise: otherwise.map(Box::new),
        }
        .into()
    }

    /// A simple CASE expression comparing `operand` against each arm.
    pub fn simple_case(operand: impl Into<Expr>, arms: Vec<CaseArm>, otherwise: Option<Expr>) -> Self {
        ExprCase {
            operand: Some(Box::new(operand.into())),
            arms,
            otherwise: otherwise.map(Box::new),
        }
        .into()
    }
}

impl From<ExprCase> for Expr {
    fn from(value: ExprCase) -> Self {
        Self::Case(value)
    }
}
