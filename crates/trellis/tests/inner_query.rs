use pretty_assertions::assert_eq;

use trellis::stmt::{Direction, Expr, Ty, Value};
use trellis::{CompiledQuery, ProjectedProperty, Projection, Query, Serializer};

fn inner_query() -> CompiledQuery {
    Query::from("Person", "p")
        .join(
            "PersonClass",
            "pc",
            Expr::eq(Expr::column("pc", "PersonId"), Expr::column("p", "Id")),
        )
        .filter(Expr::gt(Expr::column("p", "Age"), Expr::value(18i64)))
        .map(Projection::object(vec![
            ProjectedProperty::setter(
                "personId",
                Projection::scalar(Expr::column("p", "Id"), Ty::I64),
            ),
            ProjectedProperty::setter(
                "classCount",
                Projection::scalar(Expr::count(Some(Expr::column("pc", "Id"))), Ty::I64),
            ),
        ]))
        .compile(&Serializer::postgresql())
        .unwrap()
}

#[test]
fn wrapping_splices_the_inner_statement_into_from() {
    let inner = inner_query();
    assert_eq!(inner.sql().where_sql, " WHERE \"p\".\"Age\" > @p0");

    let outer = Query::from_compiled(&inner, "w")
        .map(Projection::object(vec![ProjectedProperty::setter(
            "total",
            Projection::scalar(Expr::sum(Expr::column("w", "classCount")), Ty::I64),
        )]))
        .compile(&Serializer::postgresql())
        .unwrap();

    let sql = outer.sql();

    // (setup, before, "", after): the inner WHERE lives inside the FROM
    // parens, and the outer WHERE slot stays empty.
    assert_eq!(sql.where_sql, "");
    assert!(sql
        .before_where_sql
        .starts_with("SELECT SUM(\"w\".\"classCount\") AS \"total\" FROM ("));
    assert!(sql.before_where_sql.ends_with(" WHERE \"p\".\"Age\" > @p0"));
    assert!(sql.after_where_sql.ends_with(") \"w\""));

    // The inner statement's parameters stay bound through the wrapper.
    let (bound_sql, params) = outer.bind(&[]).unwrap();
    assert!(bound_sql.contains("@p0"));
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].name, "@p0");
    assert_eq!(params[0].value, Value::I64(18));
}

#[test]
fn outer_wrapper_rejects_where() {
    let inner = inner_query();
    let err = Query::from_compiled(&inner, "w")
        .filter(Expr::gt(Expr::column("w", "classCount"), Expr::value(1i64)))
        .map(Projection::object(vec![]))
        .compile(&Serializer::postgresql())
        .unwrap_err();

    assert!(err.is_configuration());
    assert_eq!(
        err.to_string(),
        "invalid configuration: cannot combine an inner query with WHERE"
    );
}

#[test]
fn outer_wrapper_rejects_join() {
    let inner = inner_query();
    let err = Query::from_compiled(&inner, "w")
        .join(
            "Instructor",
            "t",
            Expr::eq(Expr::column("t", "Id"), Expr::column("w", "instructorId")),
        )
        .map(Projection::object(vec![]))
        .compile(&Serializer::postgresql())
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "invalid configuration: cannot combine an inner query with JOIN"
    );
}

#[test]
fn outer_wrapper_rejects_order_by() {
    let inner = inner_query();
    let err = Query::from_compiled(&inner, "w")
        .order_by(Expr::column("w", "classCount"), Direction::Desc)
        .map(Projection::object(vec![]))
        .compile(&Serializer::postgresql())
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "invalid configuration: cannot combine an inner query with ORDER BY"
    );
}

#[test]
fn outer_wrapper_rejects_strict_joins() {
    let inner = inner_query();
    let err = Query::from_compiled(&inner, "w")
        .strict_joins()
        .map(Projection::object(vec![]))
        .compile(&Serializer::postgresql())
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "invalid configuration: cannot combine strict joins with an inner query"
    );
}
