use super::{Comma, Formatter, Ident, Params, ToSql};

use trellis_core::stmt::{BinaryOp, Expr, UnaryOp};

impl ToSql for &Expr {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Expr::Aggregate(expr) => {
                let keyword = expr.func.keyword();
                match &expr.arg {
                    Some(arg) => fmt!(f, keyword "(" arg ")"),
                    // Only COUNT may omit its argument
                    None => fmt!(f, keyword "(*)"),
                }
            }
            Expr::BinaryOp(expr) => {
                let op = f.serializer.flavor.binary_op(expr.op);

                // Logical and arithmetic compositions are parenthesized so
                // operator precedence never depends on the dialect.
                if matches!(
                    expr.op,
                    BinaryOp::And
                        | BinaryOp::Or
                        | BinaryOp::Add
                        | BinaryOp::Sub
                        | BinaryOp::Mul
                        | BinaryOp::Div
                ) {
                    fmt!(f, "(" expr.lhs " " op " " expr.rhs ")");
                } else {
                    fmt!(f, expr.lhs " " op " " expr.rhs);
                }
            }
            Expr::Case(expr) => {
                fmt!(f, "CASE");
                if let Some(operand) = &expr.operand {
                    fmt!(f, " " operand);
                }
                for arm in &expr.arms {
                    fmt!(f, " WHEN " arm.when " THEN " arm.then);
                }
                if let Some(otherwise) = &expr.otherwise {
                    fmt!(f, " ELSE " otherwise);
                }
                fmt!(f, " END");
            }
            Expr::Column(column) => {
                f.references.insert(column.table.clone());
                let table = Ident(&column.table);
                let name = Ident(&column.name);
                fmt!(f, table "." name);
            }
            Expr::InList(expr) => {
                fmt!(f, expr.expr " IN (" expr.list ")");
            }
            Expr::IsNull(expr) => {
                if expr.negate {
                    fmt!(f, expr.expr " IS NOT NULL");
                } else {
                    fmt!(f, expr.expr " IS NULL");
                }
            }
            Expr::List(expr) => {
                let items = Comma(&expr.items);
                fmt!(f, items);
            }
            Expr::Param(param) => {
                let placeholder = f.params.push_deferred(param.index, param.fan_out);
                placeholder.to_sql(f);
            }
            Expr::Singular(expr) => {
                // A singular dereference renders as a plain scalar column
                // reference; the 1:1 intent was already recorded upstream.
                expr.expr.to_sql(f);
            }
            Expr::UnaryOp(expr) => match expr.op {
                UnaryOp::Not => fmt!(f, "NOT (" expr.expr ")"),
                UnaryOp::Neg => fmt!(f, "-(" expr.expr ")"),
            },
            Expr::Value(value) => {
                let placeholder = f.params.push(value);
                placeholder.to_sql(f);
            }
        }
    }
}
