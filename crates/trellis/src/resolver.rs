use crate::projection::Projection;
use crate::Serializer;

use trellis_core::graph::PropertyBinding;
use trellis_core::stmt::{SelectColumn, SelectStatement, Source, Ty};
use trellis_core::{Error, Result};
use trellis_sql::ParamRegistry;

use indexmap::IndexSet;

/// Resolves a projection against the statement: determines each leaf's
/// owning table and aggregation status, injects row-identity columns,
/// validates grouping consistency, and derives the GROUP BY key set.
pub(crate) struct Resolver<'a> {
    serializer: &'a Serializer,
    stmt: &'a mut SelectStatement,
    params: &'a mut ParamRegistry,
    aliases: IndexSet<String>,
}

/// Resolver output consumed by the property-graph builder.
pub(crate) struct Resolution {
    /// Tables the projection references; drives unused-table pruning.
    pub required: Vec<String>,

    pub root: ResolvedNode,
}

/// The projection tree with every leaf bound to a select-column alias.
pub(crate) enum ResolvedNode {
    Scalar {
        alias: String,
        ty: Ty,
    },
    Object {
        /// Table supplying the node's grouping identity.
        owner: Option<String>,
        collection: bool,
        children: Vec<(PropertyBinding, ResolvedNode)>,
    },
}

impl<'a> Resolver<'a> {
    pub fn new(
        serializer: &'a Serializer,
        stmt: &'a mut SelectStatement,
        params: &'a mut ParamRegistry,
    ) -> Self {
        Self {
            serializer,
            stmt,
            params,
            aliases: IndexSet::new(),
        }
    }

    pub fn resolve(mut self, projection: &Projection) -> Result<Resolution> {
        // Classify every table by how the projection touches it.
        let mut inside = IndexSet::new();
        let mut outside = IndexSet::new();
        let mut has_aggregated = false;

        projection.for_each_leaf(&mut |expr| {
            if expr.aggregation().is_aggregated() {
                has_aggregated = true;
            }
            expr.for_each_column(&mut |column, under_aggregate| {
                if under_aggregate {
                    inside.insert(column.table.clone());
                } else {
                    outside.insert(column.table.clone());
                }
            });
        });

        for table in &outside {
            if inside.contains(table) {
                return Err(Error::configuration(format!(
                    "cannot use table `{table}` in group and non-group context"
                )));
            }
        }
        for table in &outside {
            for aggregated in &inside {
                if self.stmt.is_ancestor(aggregated, table)? {
                    return Err(Error::configuration(format!(
                        "cannot reference table `{table}` outside an aggregate: \
                         it descends from aggregated table `{aggregated}`"
                    )));
                }
            }
        }

        // Row identity is injected for every table a non-aggregated mapped
        // property reads, plus its join-chain ancestors, so a child grouping
        // always has its parent's identity available for nesting.
        let mut identity_tables = IndexSet::new();
        for table in &outside {
            for ancestor in self.stmt.lineage(table)? {
                identity_tables.insert(ancestor);
            }
        }
        if !has_aggregated {
            identity_tables.insert(self.stmt.alias.clone());
        }
        // Declaration order keeps the identity block deterministic.
        let mut identity_tables: Vec<String> = identity_tables.into_iter().collect();
        identity_tables.sort_by_key(|alias| self.stmt.tables.get_index_of(alias));
        for table in &identity_tables {
            self.ensure_identity(table)?;
        }

        let mut path = Vec::new();
        let root = self.node(projection, &mut path, None, None)?;

        // GROUP BY is emitted automatically, and only, when the projection
        // aggregates: the key set is every non-aggregated represented
        // column across the whole select list.
        if has_aggregated {
            self.stmt.group_by = self
                .stmt
                .select_columns
                .iter()
                .filter(|column| !column.aggregated)
                .map(|column| column.sql.clone())
                .collect();
        }

        let mut required: Vec<String> = outside.into_iter().collect();
        for table in inside {
            if !required.contains(&table) {
                required.push(table);
            }
        }

        Ok(Resolution { required, root })
    }

    fn ensure_identity(&mut self, table: &str) -> Result<()> {
        if table == self.stmt.alias {
            if let Source::Inner { identity, .. } = &self.stmt.source {
                // An inner query exposes its root identity only if the
                // inner statement selected one.
                let Some(inner_alias) = identity.clone() else {
                    return Ok(());
                };
                let sql = format!(
                    "{}.{}",
                    self.serializer.quote(table),
                    self.serializer.quote(&inner_alias)
                );
                return self.stmt.ensure_row_identity(table, sql);
            }
        }
        let sql = self.serializer.row_identity_sql(table);
        self.stmt.ensure_row_identity(table, sql)
    }

    fn node(
        &mut self,
        projection: &Projection,
        path: &mut Vec<String>,
        context: Option<&str>,
        binding: Option<&PropertyBinding>,
    ) -> Result<ResolvedNode> {
        match projection {
            Projection::Scalar { expr, ty } => {
                let condition = self
                    .serializer
                    .serialize_condition("SELECT", expr, self.params)?;

                let tables = expr.referenced_tables();
                let owner = self.owning_table(&tables, context)?;
                let alias = self.unique_alias(path);
                let aggregated = expr.aggregation().is_aggregated();
                let ctor_arg = match binding {
                    Some(PropertyBinding::CtorArg(position)) => Some(*position),
                    _ => None,
                };

                self.stmt.select_columns.push(SelectColumn {
                    alias: alias.clone(),
                    sql: condition.sql,
                    ty: ty.clone(),
                    table: owner,
                    row_identity: false,
                    aggregated,
                    ctor_arg,
                });

                Ok(ResolvedNode::Scalar {
                    alias,
                    ty: ty.clone(),
                })
            }
            Projection::Object { .. } | Projection::Collection { .. } => {
                let collection = projection.is_collection();

                let owner = if let Projection::Collection {
                    source: Some(source),
                    ..
                } = projection
                {
                    // A declared collection source wins over inference.
                    self.stmt.table(source)?;
                    Some(source.clone())
                } else {
                    let tables = projection.represented_tables();
                    match self.owning_table(&tables, context)? {
                        Some(owner) => Some(owner),
                        // A node with no table references groups under its
                        // enclosing scope.
                        None => context
                            .map(str::to_string)
                            .or_else(|| Some(self.stmt.alias.clone())),
                    }
                };

                if !path.is_empty() {
                    if let Some(owner) = &owner {
                        let key = self.stmt.table(owner)?.primary_key.clone();
                        self.stmt.property_keys.insert(path.join("."), key);
                    }
                }

                let mut children = Vec::new();
                for property in projection.properties() {
                    path.push(property.path_segment());
                    let child = self.node(
                        &property.projection,
                        path,
                        owner.as_deref(),
                        Some(&property.binding),
                    )?;
                    path.pop();
                    children.push((property.binding.clone(), child));
                }

                Ok(ResolvedNode::Object {
                    owner,
                    collection,
                    children,
                })
            }
        }
    }

    /// Table precedence ordering: among all referenced tables, pick the one
    /// not reachable as an ancestor of any other — the most downstream
    /// table in the join chain.
    ///
    /// The context-relative chain is checked before the table-to-table
    /// chain. This is a heuristic, not a guaranteed total order: candidates
    /// with no ancestor relationship either way are an unresolvable-
    /// precedence error.
    fn owning_table(&self, tables: &[String], context: Option<&str>) -> Result<Option<String>> {
        match tables {
            [] => Ok(None),
            [single] => Ok(Some(single.clone())),
            _ => {
                if let Some(context) = context {
                    let mut on_chain = Vec::new();
                    for table in tables {
                        if table == context
                            || self.stmt.is_ancestor(context, table)?
                            || self.stmt.is_ancestor(table, context)?
                        {
                            on_chain.push(table.clone());
                        }
                    }
                    if !on_chain.is_empty() && on_chain.len() < tables.len() {
                        if let Some(winner) = self.most_downstream(&on_chain)? {
                            return Ok(Some(winner));
                        }
                    }
                }

                match self.most_downstream(tables)? {
                    Some(winner) => Ok(Some(winner)),
                    None => Err(Error::configuration(format!(
                        "unresolvable table precedence between `{}`",
                        tables.join("`, `")
                    ))),
                }
            }
        }
    }

    /// The candidate every other candidate is an ancestor of, if one
    /// exists.
    fn most_downstream(&self, tables: &[String]) -> Result<Option<String>> {
        'candidates: for candidate in tables {
            let lineage = self.stmt.lineage(candidate)?;
            for other in tables {
                if other != candidate && !lineage.contains(other) {
                    continue 'candidates;
                }
            }
            return Ok(Some(candidate.clone()));
        }
        Ok(None)
    }

    fn unique_alias(&mut self, path: &[String]) -> String {
        let base = if path.is_empty() {
            "value".to_string()
        } else {
            path.join("_")
        };

        let mut alias = base.clone();
        let mut n = 2;
        while self.aliases.contains(&alias)
            || self.stmt.select_columns.iter().any(|c| c.alias == alias)
        {
            alias = format!("{base}_{n}");
            n += 1;
        }
        self.aliases.insert(alias.clone());
        alias
    }
}
