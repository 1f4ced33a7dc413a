use crate::row::{DecoderCache, RowDecoder};

use trellis_core::driver::{Executor, Param, Rows};
use trellis_core::graph::RootObjectPropertyGraph;
use trellis_core::stmt::{CompiledSql, SelectStatement, Value};
use trellis_core::Result;
use trellis_sql::ParamRegistry;

/// An immutable compiled query: finalized statement, rendered SQL
/// fragments, row-shape property graph, and the parameter template.
///
/// Compilation is meant to be memoized once; the artifact is safe for
/// concurrent reuse across many executions with different argument values.
#[derive(Debug, Clone)]
pub struct CompiledQuery {
    statement: SelectStatement,
    sql: CompiledSql,
    graph: RootObjectPropertyGraph,
    params: ParamRegistry,
}

impl CompiledQuery {
    pub(crate) fn new(
        statement: SelectStatement,
        sql: CompiledSql,
        graph: RootObjectPropertyGraph,
        params: ParamRegistry,
    ) -> Self {
        Self {
            statement,
            sql,
            graph,
            params,
        }
    }

    pub fn statement(&self) -> &SelectStatement {
        &self.statement
    }

    /// The four-fragment compiled SQL.
    pub fn sql(&self) -> &CompiledSql {
        &self.sql
    }

    /// The output contract for the row materializer.
    pub fn graph(&self) -> &RootObjectPropertyGraph {
        &self.graph
    }

    /// The ordered parameter template.
    pub fn params(&self) -> &ParamRegistry {
        &self.params
    }

    /// Binds arguments into the parameter template: expands IN markers now
    /// that list lengths are known and returns the final statement text
    /// with its ordered parameters.
    pub fn bind(&self, args: &[Value]) -> Result<(String, Vec<Param>)> {
        self.params.bind(&self.sql.statement_sql(), args)
    }

    /// Executes the query: setup statements first, then the main statement,
    /// one request per execution.
    pub async fn execute(&self, executor: &dyn Executor, args: &[Value]) -> Result<Rows> {
        if !self.sql.setup_sql.is_empty() {
            executor.execute(&self.sql.setup_sql, &[]).await?;
        }

        let (sql, params) = self.bind(args)?;
        executor.execute(&sql, &params).await
    }

    /// Executes the query and decodes every row against the declared
    /// select-column types.
    pub async fn fetch(
        &self,
        executor: &dyn Executor,
        args: &[Value],
        decoders: &DecoderCache,
    ) -> Result<Vec<Vec<Value>>> {
        let signature = self
            .statement
            .select_columns
            .iter()
            .map(|column| column.ty.clone())
            .collect();
        let decoder = decoders.decoder(signature);

        let mut rows = self.execute(executor, args).await?;
        let mut decoded = Vec::with_capacity(rows.len());
        while let Some(row) = rows.next_row() {
            decoded.push(decoder.decode(row)?);
        }
        Ok(decoded)
    }
}
