use pretty_assertions::assert_eq;

use trellis::stmt::{Expr, Ty};
use trellis::{ProjectedProperty, Projection, Query, QueryBuilder, Serializer};

fn with_two_joins() -> QueryBuilder {
    Query::from("Person", "p")
        .join(
            "PersonClass",
            "pc",
            Expr::eq(Expr::column("pc", "PersonId"), Expr::column("p", "Id")),
        )
        .join(
            "Address",
            "a",
            Expr::eq(Expr::column("a", "PersonId"), Expr::column("p", "Id")),
        )
}

fn name_only() -> Projection {
    Projection::object(vec![ProjectedProperty::setter(
        "name",
        Projection::scalar(Expr::column("p", "Name"), Ty::String),
    )])
}

#[test]
fn unused_joins_are_pruned() {
    let compiled = with_two_joins()
        .map(name_only())
        .compile(&Serializer::postgresql())
        .unwrap();

    assert!(compiled.statement().join("pc").is_none());
    assert!(compiled.statement().join("a").is_none());
    assert!(!compiled.sql().before_where_sql.contains("JOIN"));
}

#[test]
fn joins_referenced_by_where_are_retained() {
    let compiled = with_two_joins()
        .filter(Expr::eq(Expr::column("a", "City"), Expr::value("Oslo")))
        .map(name_only())
        .compile(&Serializer::postgresql())
        .unwrap();

    assert!(compiled.statement().join("a").is_some());
    assert!(compiled.statement().join("pc").is_none());
}

#[test]
fn lineage_keeps_transitive_joins_alive() {
    // t joins off pc; projecting t must keep pc in the statement.
    let compiled = Query::from("Person", "p")
        .join(
            "PersonClass",
            "pc",
            Expr::eq(Expr::column("pc", "PersonId"), Expr::column("p", "Id")),
        )
        .join(
            "Instructor",
            "t",
            Expr::eq(Expr::column("t", "ClassId"), Expr::column("pc", "ClassId")),
        )
        .map(Projection::object(vec![ProjectedProperty::setter(
            "instructor",
            Projection::scalar(Expr::column("t", "Name"), Ty::String),
        )]))
        .compile(&Serializer::postgresql())
        .unwrap();

    assert!(compiled.statement().join("pc").is_some());
    assert!(compiled.statement().join("t").is_some());
}

#[test]
fn strict_joins_retains_unused_joins() {
    let compiled = with_two_joins()
        .strict_joins()
        .map(name_only())
        .compile(&Serializer::postgresql())
        .unwrap();

    assert!(compiled.statement().join("pc").is_some());
    assert!(compiled.statement().join("a").is_some());
    let sql = &compiled.sql().before_where_sql;
    assert!(sql.contains("\"pc\""));
    assert!(sql.contains("\"a\""));
}

#[test]
fn joining_against_an_unknown_alias_fails() {
    let err = Query::from("Person", "p")
        .join(
            "Instructor",
            "t",
            // References an alias that was never joined
            Expr::eq(Expr::column("t", "ClassId"), Expr::column("pc", "ClassId")),
        )
        .map(name_only())
        .compile(&Serializer::postgresql())
        .unwrap_err();

    assert!(err.is_unknown_alias());
    assert_eq!(err.to_string(), "table not found: `pc`");
}

#[test]
fn literal_only_on_condition_falls_back_to_root() {
    let compiled = Query::from("Person", "p")
        .join("Audit", "au", Expr::eq(Expr::value(1i64), Expr::value(1i64)))
        .map(Projection::object(vec![
            ProjectedProperty::setter(
                "name",
                Projection::scalar(Expr::column("p", "Name"), Ty::String),
            ),
            ProjectedProperty::setter(
                "audit",
                Projection::scalar(Expr::column("au", "Note"), Ty::String),
            ),
        ]))
        .compile(&Serializer::postgresql())
        .unwrap();

    let joined_from = &compiled.statement().table("au").unwrap().joined_from;
    assert_eq!(joined_from, &["p".to_string()]);
}
