use super::Expr;

/// Aggregate functions understood by the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFunc {
    Sum,
    Count,
    Avg,
    Min,
    Max,
}

impl AggregateFunc {
    pub fn keyword(self) -> &'static str {
        match self {
            AggregateFunc::Sum => "SUM",
            AggregateFunc::Count => "COUNT",
            AggregateFunc::Avg => "AVG",
            AggregateFunc::Min => "MIN",
            AggregateFunc::Max => "MAX",
        }
    }
}

/// An aggregate function call.
///
/// The argument is optional only for COUNT, which renders as `COUNT(*)`
/// when no argument is given.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprAggregate {
    pub func: AggregateFunc,
    pub arg: Option<Box<Expr>>,
}

impl Expr {
    pub fn aggregate(func: AggregateFunc, arg: impl Into<Expr>) -> Self {
        ExprAggregate {
            func,
            arg: Some(Box::new(arg.into())),
        }
        .into()
    }

    pub fn sum(arg: impl Into<Expr>) -> Self {
        Expr::aggregate(AggregateFunc::Sum, arg)
    }

    /// COUNT(arg), or COUNT(*) when `arg` is `None`.
    pub fn count(arg: Option<Expr>) -> Self {
        ExprAggregate {
            func: AggregateFunc::Count,
            arg: arg.map(Box::new),
        }
        .into()
    }

    pub fn avg(arg: impl Into<Expr>) -> Self {
        Expr::aggregate(AggregateFunc::Avg, arg)
    }

    pub fn min(arg: impl Into<Expr>) -> Self {
        Expr::aggregate(AggregateFunc::Min, arg)
    }

    pub fn max(arg: impl Into<Expr>) -> Self {
        Expr::aggregate(AggregateFunc::Max, arg)
    }
}

impl From<ExprAggregate> for Expr {
    fn from(value: ExprAggregate) -> Self {
        Self::Aggregate(value)
    }
}
