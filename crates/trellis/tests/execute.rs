mod support;

use pretty_assertions::assert_eq;
use support::FakeExecutor;

use trellis::stmt::{Expr, Ty, Value};
use trellis::{CompiledQuery, DecoderCache, ProjectedProperty, Projection, Query, Serializer};

fn adults_by_id() -> CompiledQuery {
    Query::from("Person", "p")
        .filter(Expr::in_list(Expr::column("p", "Id"), Expr::param_list(0)))
        .map(Projection::object(vec![ProjectedProperty::setter(
            "name",
            Projection::scalar(Expr::column("p", "Name"), Ty::String),
        )]))
        .compile(&Serializer::postgresql())
        .unwrap()
}

#[tokio::test]
async fn in_markers_are_expanded_at_execution_time() {
    let compiled = adults_by_id();
    assert_eq!(
        compiled.sql().where_sql,
        " WHERE \"p\".\"Id\" IN (@p0__in)"
    );

    let executor = FakeExecutor::default();
    let args = vec![Value::List(vec![
        Value::I64(1),
        Value::I64(2),
        Value::I64(3),
    ])];
    compiled.execute(&executor, &args).await.unwrap();

    let calls = executor.calls();
    assert_eq!(calls.len(), 1);

    let (sql, params) = &calls[0];
    assert!(sql.contains("IN (@p0_0, @p0_1, @p0_2)"));
    assert!(!sql.contains("__in"));

    let names: Vec<_> = params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["@p0_0", "@p0_1", "@p0_2"]);
}

#[tokio::test]
async fn non_list_argument_for_in_marker_is_fatal() {
    let compiled = adults_by_id();
    let executor = FakeExecutor::default();

    let err = compiled
        .execute(&executor, &[Value::I64(1)])
        .await
        .unwrap_err();
    assert!(err.is_expression_shape());

    // Nothing was sent to the driver.
    assert!(executor.calls().is_empty());
}

#[tokio::test]
async fn missing_argument_is_fatal() {
    let compiled = adults_by_id();
    let executor = FakeExecutor::default();

    let err = compiled.execute(&executor, &[]).await.unwrap_err();
    assert!(err.is_expression_shape());
}

#[tokio::test]
async fn fetch_decodes_rows_against_declared_types() {
    let compiled = adults_by_id();
    let decoders = DecoderCache::new();

    // Select list: p__row_id (i64), name (string)
    let executor = FakeExecutor::with_rows(vec![
        vec![Value::I64(1), Value::String("John".into())],
        vec![Value::I64(2), Value::String("Jane".into())],
    ]);

    let args = vec![Value::List(vec![Value::I64(1), Value::I64(2)])];
    let rows = compiled.fetch(&executor, &args, &decoders).await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][1], Value::String("John".into()));
    assert_eq!(decoders.len(), 1);
}

#[tokio::test]
async fn incompatible_row_value_is_a_type_error() {
    let compiled = adults_by_id();
    let decoders = DecoderCache::new();

    // Null lands in the non-nullable name column
    let executor = FakeExecutor::with_rows(vec![vec![Value::I64(1), Value::Null]]);

    let args = vec![Value::List(vec![Value::I64(1)])];
    let err = compiled
        .fetch(&executor, &args, &decoders)
        .await
        .unwrap_err();
    assert!(err.is_type_conversion());
}
