use super::{ComplexProperty, SimpleProperty};
use crate::{bail, Result};

/// One node of the output-shape tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectGraph {
    pub simple: Vec<SimpleProperty>,
    pub complex: Vec<ComplexProperty>,
}

/// The output contract between the compiler and the row materializer.
///
/// Describes, for a fixed compiled query, exactly how a flat row-tuple
/// sequence folds into nested output objects. Column indices match the
/// rendered SELECT list ordinals 1:1; identity-key index chains match the
/// identity columns actually emitted. Pure data: built once per compiled
/// query and reused across executions.
#[derive(Debug, Clone, PartialEq)]
pub struct RootObjectPropertyGraph {
    /// SELECT-list ordinals of the root object's identity-key chain.
    pub key_indices: Vec<usize>,

    pub graph: ObjectGraph,

    /// Width of the rendered SELECT list; every column index is below this.
    pub width: usize,
}

impl RootObjectPropertyGraph {
    /// Checks that every column index the graph references is inside the
    /// SELECT list.
    pub fn validate(&self) -> Result<()> {
        for index in &self.key_indices {
            if *index >= self.width {
                bail!(
                    "property graph key index {index} exceeds select list width {}",
                    self.width
                );
            }
        }
        validate_node(&self.graph, self.width)
    }
}

fn validate_node(node: &ObjectGraph, width: usize) -> Result<()> {
    for property in &node.simple {
        if property.column_index >= width {
            bail!(
                "property graph column index {} exceeds select list width {width}",
                property.column_index
            );
        }
    }
    for property in &node.complex {
        for index in &property.key_indices {
            if *index >= width {
                bail!(
                    "property graph key index {index} exceeds select list width {width}"
                );
            }
        }
        validate_node(&property.graph, width)?;
    }
    Ok(())
}
