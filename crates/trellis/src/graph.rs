use crate::resolver::{Resolution, ResolvedNode};

use trellis_core::graph::{
    ComplexProperty, ObjectGraph, PropertyBinding, RootObjectPropertyGraph, SimpleProperty,
};
use trellis_core::stmt::SelectStatement;
use trellis_core::Result;

/// Builds the row-shape property graph for a finalized statement.
///
/// Column indices match the rendered SELECT list ordinals 1:1, and
/// identity-key index chains match the identity columns actually emitted —
/// this is the correctness-critical contract with the row materializer.
pub(crate) fn build(
    stmt: &SelectStatement,
    resolution: &Resolution,
) -> Result<RootObjectPropertyGraph> {
    let width = stmt.select_columns.len();

    match &resolution.root {
        ResolvedNode::Scalar { alias, ty } => Ok(RootObjectPropertyGraph {
            key_indices: table_key_indices(stmt, Some(&stmt.alias)),
            graph: ObjectGraph {
                simple: vec![SimpleProperty {
                    binding: PropertyBinding::CtorArg(0),
                    column_index: stmt.column_index(alias)?,
                    index_path: vec![],
                    declared_ty: ty.clone(),
                }],
                complex: vec![],
            },
            width,
        }),
        ResolvedNode::Object { owner, children, .. } => Ok(RootObjectPropertyGraph {
            key_indices: table_key_indices(stmt, owner.as_deref()),
            graph: node_graph(stmt, children, &[])?,
            width,
        }),
    }
}

fn node_graph(
    stmt: &SelectStatement,
    children: &[(PropertyBinding, ResolvedNode)],
    index_path: &[usize],
) -> Result<ObjectGraph> {
    let mut graph = ObjectGraph::default();

    for (binding, child) in children {
        match child {
            ResolvedNode::Scalar { alias, ty } => graph.simple.push(SimpleProperty {
                binding: binding.clone(),
                column_index: stmt.column_index(alias)?,
                index_path: index_path.to_vec(),
                declared_ty: ty.clone(),
            }),
            ResolvedNode::Object {
                owner,
                collection,
                children,
            } => {
                let mut child_path = index_path.to_vec();
                if *collection {
                    child_path.push(graph.complex.len());
                }
                graph.complex.push(ComplexProperty {
                    binding: binding.clone(),
                    collection: *collection,
                    key_indices: table_key_indices(stmt, owner.as_deref()),
                    graph: node_graph(stmt, children, &child_path)?,
                });
            }
        }
    }

    Ok(graph)
}

/// SELECT-list ordinals of a table's composite key, restricted to the
/// identity columns actually selected. Empty means no deduplication.
fn table_key_indices(stmt: &SelectStatement, owner: Option<&str>) -> Vec<usize> {
    let Some(owner) = owner else {
        return vec![];
    };
    let Ok(table) = stmt.table(owner) else {
        return vec![];
    };
    table
        .primary_key
        .columns()
        .iter()
        .filter_map(|alias| stmt.column_index(alias).ok())
        .collect()
}
