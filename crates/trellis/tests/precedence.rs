use pretty_assertions::assert_eq;

use trellis::stmt::{Expr, Ty};
use trellis::{ProjectedProperty, Projection, Query, QueryBuilder, Serializer};

/// a at the root, b and c joined off a, d joined off both b and c.
fn diamond() -> QueryBuilder {
    Query::from("A", "a")
        .join("B", "b", Expr::eq(Expr::column("b", "AId"), Expr::column("a", "Id")))
        .join("C", "c", Expr::eq(Expr::column("c", "AId"), Expr::column("a", "Id")))
        .join(
            "D",
            "d",
            Expr::and(
                Expr::eq(Expr::column("d", "BId"), Expr::column("b", "Id")),
                Expr::eq(Expr::column("d", "CId"), Expr::column("c", "Id")),
            ),
        )
}

#[test]
fn most_downstream_table_wins() {
    // d's lineage contains b, so d supplies the identity.
    let compiled = diamond()
        .map(Projection::object(vec![ProjectedProperty::setter(
            "v",
            Projection::scalar(
                Expr::add(Expr::column("b", "X"), Expr::column("d", "Z")),
                Ty::I64,
            ),
        )]))
        .compile(&Serializer::postgresql())
        .unwrap();

    let column = compiled.statement().select_column("v").unwrap();
    assert_eq!(column.table.as_deref(), Some("d"));
}

#[test]
fn disjoint_branches_are_unresolvable() {
    // b and c sit on disjoint branches of the diamond: no ancestor
    // relationship either way.
    let err = diamond()
        .map(Projection::object(vec![ProjectedProperty::setter(
            "v",
            Projection::scalar(
                Expr::add(Expr::column("b", "X"), Expr::column("c", "Y")),
                Ty::I64,
            ),
        )]))
        .compile(&Serializer::postgresql())
        .unwrap_err();

    assert!(err.is_configuration());
    assert_eq!(
        err.to_string(),
        "invalid configuration: unresolvable table precedence between `b`, `c`"
    );
}

#[test]
fn mapping_context_chain_is_checked_first() {
    // Inside the collection ranging over c, a leaf mixing c with the
    // off-chain b resolves to the context's chain rather than erroring.
    let compiled = diamond()
        .map(Projection::object(vec![ProjectedProperty::setter(
            "items",
            Projection::collection_of("c", vec![ProjectedProperty::setter(
                "v",
                Projection::scalar(
                    Expr::add(Expr::column("c", "Y"), Expr::column("b", "X")),
                    Ty::I64,
                ),
            )]),
        )]))
        .compile(&Serializer::postgresql())
        .unwrap();

    let column = compiled.statement().select_column("items_v").unwrap();
    assert_eq!(column.table.as_deref(), Some("c"));
}

#[test]
fn ancestor_never_outranks_its_descendant() {
    let compiled = diamond()
        .map(Projection::object(vec![ProjectedProperty::setter(
            "v",
            Projection::scalar(
                Expr::add(Expr::column("a", "W"), Expr::column("b", "X")),
                Ty::I64,
            ),
        )]))
        .compile(&Serializer::postgresql())
        .unwrap();

    let column = compiled.statement().select_column("v").unwrap();
    assert_eq!(column.table.as_deref(), Some("b"));
}
