use super::Serializer;

use trellis_core::stmt::{CompiledSql, SelectStatement, Source, ROW_ID_TOKEN};
use trellis_core::{Error, Result};

impl Serializer {
    /// Assembles a finalized statement into the four-fragment compiled SQL.
    ///
    /// All expressions were already lowered to text while the statement was
    /// built; this pass is deterministic assembly only.
    pub fn serialize_select(&self, stmt: &SelectStatement) -> Result<CompiledSql> {
        if stmt.source.is_inner() {
            // Direct clauses on the outer wrapper must be pushed into the
            // inner query instead.
            if !stmt.joins.is_empty() {
                return Err(Error::configuration(
                    "cannot combine an inner query with JOIN",
                ));
            }
            if stmt.where_sql.is_some() {
                return Err(Error::configuration(
                    "cannot combine an inner query with WHERE",
                ));
            }
            if !stmt.order_by.is_empty() {
                return Err(Error::configuration(
                    "cannot combine an inner query with ORDER BY",
                ));
            }
            if stmt.strict_joins {
                return Err(Error::configuration(
                    "cannot combine strict joins with an inner query",
                ));
            }
        }

        let mut before = String::from("SELECT ");
        if stmt.select_columns.is_empty() {
            // Placeholder constant keeps the statement syntactically valid,
            // e.g. for pure-filter queries.
            before.push('1');
        } else {
            for (i, column) in stmt.select_columns.iter().enumerate() {
                if i > 0 {
                    before.push_str(", ");
                }
                before.push_str(&column.sql);
                before.push_str(" AS ");
                before.push_str(&self.quote(&column.alias));
            }
        }

        let after_clauses = self.after_where_clauses(stmt);

        match &stmt.source {
            Source::Table { name } => {
                before.push_str(" FROM (");
                before.push_str(&self.numbered_source(name));
                before.push_str(") AS ");
                before.push_str(&self.quote(&stmt.alias));

                for join in &stmt.joins {
                    before.push(' ');
                    before.push_str(join.kind.keyword());
                    before.push_str(" (");
                    before.push_str(&self.numbered_source(&join.table));
                    before.push_str(") AS ");
                    before.push_str(&self.quote(&join.alias));
                    before.push_str(" ON ");
                    before.push_str(&join.on_sql);
                }

                let where_sql = match &stmt.where_sql {
                    Some(condition) => format!(" WHERE {condition}"),
                    None => String::new(),
                };

                let mut setup = String::new();
                for join in &stmt.joins {
                    push_setup(&mut setup, &join.setup_sql);
                }
                push_setup(&mut setup, &stmt.where_setup_sql);
                push_setup(&mut setup, &stmt.setup_sql);

                Ok(CompiledSql {
                    setup_sql: setup,
                    before_where_sql: before,
                    where_sql,
                    after_where_sql: after_clauses,
                })
            }
            Source::Inner { sql, .. } => {
                // The inner statement's text, WHERE included, is spliced
                // inside the FROM parens; the outer WHERE slot stays empty.
                before.push_str(" FROM (");
                before.push_str(&sql.before_where_sql);
                before.push_str(&sql.where_sql);

                let mut after = sql.after_where_sql.clone();
                after.push_str(") ");
                after.push_str(&self.quote(&stmt.alias));
                after.push_str(&after_clauses);

                let mut setup = sql.setup_sql.clone();
                push_setup(&mut setup, &stmt.where_setup_sql);
                push_setup(&mut setup, &stmt.setup_sql);

                Ok(CompiledSql {
                    setup_sql: setup,
                    before_where_sql: before,
                    where_sql: String::new(),
                    after_where_sql: after,
                })
            }
        }
    }

    /// Wraps a physical table so it exposes a row-number column, giving
    /// every source row a synthesized identity.
    fn numbered_source(&self, table: &str) -> String {
        let table = self.quote(table);
        let row_id = self.quote(ROW_ID_TOKEN);
        format!("SELECT {table}.*, ROW_NUMBER() OVER () AS {row_id} FROM {table}")
    }

    fn after_where_clauses(&self, stmt: &SelectStatement) -> String {
        let mut sql = String::new();

        if !stmt.group_by.is_empty() {
            sql.push_str(" GROUP BY ");
            for (i, term) in stmt.group_by.iter().enumerate() {
                if i > 0 {
                    sql.push_str(", ");
                }
                sql.push_str(term);
            }
        }

        if !stmt.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            for (i, term) in stmt.order_by.iter().enumerate() {
                if i > 0 {
                    sql.push_str(", ");
                }
                sql.push_str(&term.sql);
                if term.direction.is_desc() {
                    sql.push(' ');
                    sql.push_str(self.flavor.desc());
                }
            }
        }

        sql
    }
}

fn push_setup(setup: &mut String, fragment: &str) {
    if fragment.is_empty() {
        return;
    }
    if !setup.is_empty() {
        setup.push('\n');
    }
    setup.push_str(fragment);
}
