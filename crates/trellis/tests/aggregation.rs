use pretty_assertions::assert_eq;

use trellis::stmt::{Expr, Ty};
use trellis::{ProjectedProperty, Projection, Query, Serializer};

fn person_class_query() -> trellis::QueryBuilder {
    Query::from("Person", "p").join(
        "PersonClass",
        "pc",
        Expr::eq(Expr::column("pc", "PersonId"), Expr::column("p", "Id")),
    )
}

#[test]
fn group_by_is_injected_for_aggregated_projections() {
    let compiled = person_class_query()
        .map(Projection::object(vec![
            ProjectedProperty::setter(
                "person",
                Projection::scalar(Expr::column("p", "Name"), Ty::String),
            ),
            ProjectedProperty::setter(
                "classCount",
                Projection::scalar(Expr::count(Some(Expr::column("pc", "Id"))), Ty::I64),
            ),
        ]))
        .compile(&Serializer::postgresql())
        .unwrap();

    // Every non-aggregated represented column, identity included — never
    // the aggregated one.
    assert_eq!(
        compiled.sql().after_where_sql,
        " GROUP BY \"p\".\"__row_id\", \"p\".\"Name\""
    );

    // No identity column for the aggregated-only table.
    let aliases: Vec<_> = compiled
        .statement()
        .select_columns
        .iter()
        .map(|column| column.alias.as_str())
        .collect();
    assert_eq!(aliases, ["p__row_id", "person", "classCount"]);

    let class_count = compiled.statement().select_column("classCount").unwrap();
    assert!(class_count.aggregated);
    assert_eq!(class_count.table.as_deref(), Some("pc"));
}

#[test]
fn no_group_by_without_aggregation() {
    let compiled = person_class_query()
        .map(Projection::object(vec![ProjectedProperty::setter(
            "name",
            Projection::scalar(Expr::column("p", "Name"), Ty::String),
        )]))
        .compile(&Serializer::postgresql())
        .unwrap();

    assert!(compiled.statement().group_by.is_empty());
    assert_eq!(compiled.sql().after_where_sql, "");
}

#[test]
fn mixing_group_and_non_group_use_of_a_table_fails() {
    // classes projects pc rows while classesCount aggregates the same
    // table from the same mapping scope.
    let err = person_class_query()
        .map(Projection::object(vec![
            ProjectedProperty::setter(
                "classes",
                Projection::collection(vec![ProjectedProperty::setter(
                    "name",
                    Projection::scalar(Expr::column("pc", "Name"), Ty::String),
                )]),
            ),
            ProjectedProperty::setter(
                "classesCount",
                Projection::scalar(Expr::count(Some(Expr::column("pc", "Id"))), Ty::I64),
            ),
        ]))
        .compile(&Serializer::postgresql())
        .unwrap_err();

    assert!(err.is_configuration());
    assert_eq!(
        err.to_string(),
        "invalid configuration: cannot use table `pc` in group and non-group context"
    );
}

#[test]
fn referencing_a_descendant_of_an_aggregated_table_fails() {
    let err = person_class_query()
        .join(
            "Instructor",
            "t",
            Expr::eq(Expr::column("t", "ClassId"), Expr::column("pc", "ClassId")),
        )
        .map(Projection::object(vec![
            ProjectedProperty::setter(
                "gradeSum",
                Projection::scalar(Expr::sum(Expr::column("pc", "Grade")), Ty::I64),
            ),
            ProjectedProperty::setter(
                "instructor",
                Projection::scalar(Expr::column("t", "Name"), Ty::String),
            ),
        ]))
        .compile(&Serializer::postgresql())
        .unwrap_err();

    assert!(err.is_configuration());
    assert_eq!(
        err.to_string(),
        "invalid configuration: cannot reference table `t` outside an aggregate: \
         it descends from aggregated table `pc`"
    );
}

#[test]
fn aggregation_survives_composition_in_projection() {
    // An aggregate inside arithmetic still drives GROUP BY emission.
    let compiled = person_class_query()
        .map(Projection::object(vec![
            ProjectedProperty::setter(
                "name",
                Projection::scalar(Expr::column("p", "Name"), Ty::String),
            ),
            ProjectedProperty::setter(
                "doubledCount",
                Projection::scalar(
                    Expr::mul(
                        Expr::count(Some(Expr::column("pc", "Id"))),
                        Expr::value(2i64),
                    ),
                    Ty::I64,
                ),
            ),
        ]))
        .compile(&Serializer::postgresql())
        .unwrap();

    assert!(!compiled.statement().group_by.is_empty());
    let doubled = compiled.statement().select_column("doubledCount").unwrap();
    assert!(doubled.aggregated);
}
