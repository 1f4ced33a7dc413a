use super::{
    Aggregation, ExprAggregate, ExprBinaryOp, ExprCase, ExprColumn, ExprInList, ExprIsNull,
    ExprList, ExprParam, ExprSingular, ExprUnaryOp, Value,
};

/// A scalar or boolean query expression.
///
/// This is the explicit intermediate representation accepted by the query
/// builder: callers construct expression trees through the constructor
/// helpers on `Expr` rather than through source-language closures.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// An aggregate function call (SUM/COUNT/AVG/MIN/MAX)
    Aggregate(ExprAggregate),

    /// A binary operation between two expressions
    BinaryOp(ExprBinaryOp),

    /// A searched or simple CASE expression
    Case(ExprCase),

    /// A reference to a column of a joined table
    Column(ExprColumn),

    /// An IN-list membership test
    InList(ExprInList),

    /// An IS NULL / IS NOT NULL test
    IsNull(ExprIsNull),

    /// A comma list of expressions
    List(ExprList),

    /// A reference to a positionally bound parameter
    Param(ExprParam),

    /// A singular-dereference marker around a to-many column reference
    Singular(ExprSingular),

    /// A unary operation
    UnaryOp(ExprUnaryOp),

    /// A constant value inlined as a bound parameter
    Value(Value),
}

impl Expr {
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    /// Aggregation classification of this expression.
    ///
    /// An aggregate call is `Aggregated`; any composition with an aggregated
    /// operand is `ContainsAggregatedPart`. The classification is never
    /// cleared by further composition.
    pub fn aggregation(&self) -> Aggregation {
        match self {
            Expr::Aggregate(_) => Aggregation::Aggregated,
            Expr::BinaryOp(expr) => expr.lhs.aggregation().combine(expr.rhs.aggregation()),
            Expr::Case(expr) => {
                let mut agg = match &expr.operand {
                    Some(operand) => operand.aggregation(),
                    None => Aggregation::None,
                };
                for arm in &expr.arms {
                    agg = agg
                        .combine(arm.when.aggregation())
                        .combine(arm.then.aggregation());
                }
                if let Some(otherwise) = &expr.otherwise {
                    agg = agg.combine(otherwise.aggregation());
                }
                agg
            }
            Expr::InList(expr) => expr.expr.aggregation().combine(expr.list.aggregation()),
            Expr::IsNull(expr) => match expr.expr.aggregation() {
                Aggregation::None => Aggregation::None,
                _ => Aggregation::ContainsAggregatedPart,
            },
            Expr::List(expr) => expr
                .items
                .iter()
                .fold(Aggregation::None, |agg, item| agg.combine(item.aggregation())),
            Expr::UnaryOp(expr) => match expr.expr.aggregation() {
                Aggregation::None => Aggregation::None,
                _ => Aggregation::ContainsAggregatedPart,
            },
            Expr::Column(_) | Expr::Param(_) | Expr::Singular(_) | Expr::Value(_) => {
                Aggregation::None
            }
        }
    }

    /// Visits every column reference in the expression, flagging whether it
    /// sits under an aggregate function.
    pub fn for_each_column(&self, f: &mut impl FnMut(&ExprColumn, bool)) {
        self.walk_columns(false, f);
    }

    fn walk_columns(&self, under_aggregate: bool, f: &mut impl FnMut(&ExprColumn, bool)) {
        match self {
            Expr::Aggregate(expr) => {
                if let Some(arg) = &expr.arg {
                    arg.walk_columns(true, f);
                }
            }
            Expr::BinaryOp(expr) => {
                expr.lhs.walk_columns(under_aggregate, f);
                expr.rhs.walk_columns(under_aggregate, f);
            }
            Expr::Case(expr) => {
                if let Some(operand) = &expr.operand {
                    operand.walk_columns(under_aggregate, f);
                }
                for arm in &expr.arms {
                    arm.when.walk_columns(under_aggregate, f);
                    arm.then.walk_columns(under_aggregate, f);
                }
                if let Some(otherwise) = &expr.otherwise {
                    otherwise.walk_columns(under_aggregate, f);
                }
            }
            Expr::Column(column) => f(column, under_aggregate),
            Expr::InList(expr) => {
                expr.expr.walk_columns(under_aggregate, f);
                expr.list.walk_columns(under_aggregate, f);
            }
            Expr::IsNull(expr) => expr.expr.walk_columns(under_aggregate, f),
            Expr::List(expr) => {
                for item in &expr.items {
                    item.walk_columns(under_aggregate, f);
                }
            }
            Expr::Singular(expr) => expr.expr.walk_columns(under_aggregate, f),
            Expr::UnaryOp(expr) => expr.expr.walk_columns(under_aggregate, f),
            Expr::Param(_) | Expr::Value(_) => {}
        }
    }

    /// The set of table aliases referenced by the expression, in first-use
    /// order.
    pub fn referenced_tables(&self) -> Vec<String> {
        let mut tables = Vec::new();
        self.for_each_column(&mut |column, _| {
            if !tables.iter().any(|t| t == &column.table) {
                tables.push(column.table.clone());
            }
        });
        tables
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<bool> for Expr {
    fn from(value: bool) -> Self {
        Self::Value(value.into())
    }
}

impl From<i32> for Expr {
    fn from(value: i32) -> Self {
        Self::Value(value.into())
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Self::Value(value.into())
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Self::Value(value.into())
    }
}
