use crate::compiled::CompiledQuery;
use crate::projection::Projection;
use crate::resolver::Resolver;
use crate::{graph, Serializer};

use trellis_core::stmt::{
    row_identity_alias, Direction, Expr, Join, JoinKind, OrderByColumn, SelectStatement, Source,
};
use trellis_core::{Error, Result};
use trellis_sql::ParamRegistry;

/// Entry points for building a query.
#[derive(Debug)]
pub struct Query;

impl Query {
    /// Starts a query over a physical root table.
    pub fn from(table: impl Into<String>, alias: impl Into<String>) -> QueryBuilder {
        QueryBuilder {
            source: Source::Table { name: table.into() },
            alias: alias.into(),
            joins: vec![],
            filter: None,
            order_by: vec![],
            strict_joins: false,
            inner_params: None,
        }
    }

    /// Starts a query over an already-compiled statement, used to apply a
    /// further projection after aggregation/grouping has occurred.
    ///
    /// WHERE, JOIN, ORDER BY, and strict joins cannot be combined with an
    /// inner query; attempting to raises a configuration error at compile
    /// time.
    pub fn from_compiled(inner: &CompiledQuery, alias: impl Into<String>) -> QueryBuilder {
        let inner_stmt = inner.statement();
        let identity = inner_stmt
            .select_column(&row_identity_alias(&inner_stmt.alias))
            .ok()
            .map(|column| column.alias.clone());

        QueryBuilder {
            source: Source::Inner {
                sql: inner.sql().clone(),
                identity,
            },
            alias: alias.into(),
            joins: vec![],
            filter: None,
            order_by: vec![],
            strict_joins: false,
            // The inner statement's placeholders stay live inside the
            // spliced text; new parameters continue its numbering.
            inner_params: Some(inner.params().clone()),
        }
    }
}

#[derive(Debug, Clone)]
struct PendingJoin {
    table: String,
    alias: String,
    kind: JoinKind,
    on: Expr,
}

/// Accumulates joins, filters, and ordering before the query is mapped.
///
/// Builders are mutable and single-threaded; the compiled artifact they
/// produce is immutable and safe to share.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    source: Source,
    alias: String,
    joins: Vec<PendingJoin>,
    filter: Option<Expr>,
    order_by: Vec<(Expr, Direction)>,
    strict_joins: bool,
    inner_params: Option<ParamRegistry>,
}

impl QueryBuilder {
    /// Inner-joins a table under the given alias.
    pub fn join(self, table: impl Into<String>, alias: impl Into<String>, on: Expr) -> Self {
        self.join_kind(JoinKind::Inner, table, alias, on)
    }

    /// Left-joins a table under the given alias.
    pub fn left_join(self, table: impl Into<String>, alias: impl Into<String>, on: Expr) -> Self {
        self.join_kind(JoinKind::Left, table, alias, on)
    }

    fn join_kind(
        mut self,
        kind: JoinKind,
        table: impl Into<String>,
        alias: impl Into<String>,
        on: Expr,
    ) -> Self {
        self.joins.push(PendingJoin {
            table: table.into(),
            alias: alias.into(),
            kind,
            on,
        });
        self
    }

    /// Adds a WHERE condition, AND-ed with any previous one.
    pub fn filter(mut self, expr: Expr) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(prev) => Expr::and(prev, expr),
            None => expr,
        });
        self
    }

    pub fn order_by(mut self, expr: Expr, direction: Direction) -> Self {
        self.order_by.push((expr, direction));
        self
    }

    /// Always keep declared joins in the emitted SQL, even if logically
    /// unused. Trades minimal SQL size for join-editing ergonomics.
    pub fn strict_joins(mut self) -> Self {
        self.strict_joins = true;
        self
    }

    /// Attaches the output projection, moving the builder into its final
    /// phase.
    pub fn map(self, projection: Projection) -> MappedQuery {
        MappedQuery {
            query: self,
            projection,
        }
    }
}

/// A fully described query, ready to compile against a dialect.
#[derive(Debug, Clone)]
pub struct MappedQuery {
    query: QueryBuilder,
    projection: Projection,
}

impl MappedQuery {
    /// Compiles the query into an immutable artifact: rendered SQL, the
    /// parameter template, and the row-shape property graph.
    ///
    /// Compiling the same state twice produces byte-identical SQL and an
    /// equal property graph; the artifact is meant to be memoized and
    /// shared across executions.
    pub fn compile(&self, serializer: &Serializer) -> Result<CompiledQuery> {
        let query = &self.query;

        if query.source.is_inner() {
            // Clauses on the outer wrapper must be pushed into the inner
            // query instead; anything else is a configuration error.
            if !query.joins.is_empty() {
                return Err(Error::configuration(
                    "cannot combine an inner query with JOIN",
                ));
            }
            if query.filter.is_some() {
                return Err(Error::configuration(
                    "cannot combine an inner query with WHERE",
                ));
            }
            if !query.order_by.is_empty() {
                return Err(Error::configuration(
                    "cannot combine an inner query with ORDER BY",
                ));
            }
            if query.strict_joins {
                return Err(Error::configuration(
                    "cannot combine strict joins with an inner query",
                ));
            }
        }

        let mut stmt = SelectStatement::new(query.source.clone(), query.alias.clone());
        stmt.strict_joins = query.strict_joins;

        let mut params = query.inner_params.clone().unwrap_or_default();
        let mut required: Vec<String> = vec![];

        for join in &query.joins {
            let condition = serializer.serialize_condition("JOIN ON", &join.on, &mut params)?;

            let mut references = condition.references;
            references.shift_remove(&join.alias);
            if references.is_empty() {
                // An ON-condition that references no prior table, e.g. a
                // literal-only filter, hangs off the root.
                references.insert(stmt.alias.clone());
            }

            stmt.add_join(Join {
                alias: join.alias.clone(),
                table: join.table.clone(),
                kind: join.kind,
                on_sql: condition.sql,
                setup_sql: String::new(),
                references,
            })?;
        }

        if let Some(filter) = &query.filter {
            let condition = serializer.serialize_condition("WHERE", filter, &mut params)?;
            required.extend(condition.references);
            stmt.where_sql = Some(condition.sql);
        }

        for (expr, direction) in &query.order_by {
            let condition = serializer.serialize_condition("ORDER BY", expr, &mut params)?;
            required.extend(condition.references);
            stmt.order_by.push(OrderByColumn {
                sql: condition.sql,
                direction: *direction,
            });
        }

        let resolution = Resolver::new(serializer, &mut stmt, &mut params).resolve(&self.projection)?;
        required.extend(resolution.required.iter().cloned());

        stmt.prune_unused(&required)?;

        let sql = serializer.serialize_select(&stmt)?;
        let graph = graph::build(&stmt, &resolution)?;
        graph.validate()?;

        Ok(CompiledQuery::new(stmt, sql, graph, params))
    }
}
