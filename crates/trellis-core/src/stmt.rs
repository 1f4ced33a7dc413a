mod aggregation;
pub use aggregation::Aggregation;

mod compiled_sql;
pub use compiled_sql::CompiledSql;

mod composite_key;
pub use composite_key::CompositeKey;

mod direction;
pub use direction::Direction;

mod expr;
pub use expr::Expr;

mod expr_aggregate;
pub use expr_aggregate::{AggregateFunc, ExprAggregate};

mod expr_binary_op;
pub use expr_binary_op::ExprBinaryOp;

mod expr_case;
pub use expr_case::{CaseArm, ExprCase};

mod expr_column;
pub use expr_column::ExprColumn;

mod expr_in_list;
pub use expr_in_list::ExprInList;

mod expr_is_null;
pub use expr_is_null::ExprIsNull;

mod expr_list;
pub use expr_list::ExprList;

mod expr_param;
pub use expr_param::ExprParam;

mod expr_singular;
pub use expr_singular::ExprSingular;

mod expr_unary_op;
pub use expr_unary_op::ExprUnaryOp;

mod join;
pub use join::{Join, JoinKind};

mod op_binary;
pub use op_binary::BinaryOp;

mod op_unary;
pub use op_unary::UnaryOp;

mod order_by;
pub use order_by::OrderByColumn;

mod query_table;
pub use query_table::QueryTable;

mod select_column;
pub use select_column::SelectColumn;

mod select_statement;
pub use select_statement::{row_identity_alias, SelectStatement, Source, ROW_ID_TOKEN};

mod ty;
pub use ty::Ty;

mod value;
pub use value::Value;
