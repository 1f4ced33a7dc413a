use super::{CompiledSql, CompositeKey, Join, OrderByColumn, QueryTable, SelectColumn};
use crate::{Error, Result};

use indexmap::{IndexMap, IndexSet};

/// Reserved token appended to a table alias to name its synthesized
/// row-identity column.
pub const ROW_ID_TOKEN: &str = "__row_id";

/// The FROM source of a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// A physical table.
    Table { name: String },

    /// A previously compiled statement used as a FROM subquery.
    Inner {
        sql: CompiledSql,

        /// Select-column alias of the inner statement's root identity
        /// column, when the inner statement exposes one.
        identity: Option<String>,
    },
}

impl Source {
    pub fn is_inner(&self) -> bool {
        matches!(self, Source::Inner { .. })
    }
}

/// The in-memory representation of a single SQL SELECT, independent of any
/// concrete dialect apart from the SQL fragments already lowered into it.
///
/// Built up by the query builder, finalized by the mapping resolver, and
/// rendered by the SQL serializer. Immutable once compiled.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatement {
    pub source: Source,

    /// Alias of the root table.
    pub alias: String,

    /// Setup SQL contributed by the primary table source. Usually empty.
    pub setup_sql: String,

    /// Every table in the statement, root first, in declaration order.
    pub tables: IndexMap<String, QueryTable>,

    /// JOIN clauses in declaration order.
    pub joins: Vec<Join>,

    /// The SELECT list: synthesized row-identity columns first, then mapped
    /// columns in projection order.
    pub select_columns: Vec<SelectColumn>,

    /// Lowered WHERE condition, without the `WHERE` keyword.
    pub where_sql: Option<String>,

    /// Setup SQL contributed by the WHERE clause. Contractually part of the
    /// assembly order; currently always empty.
    pub where_setup_sql: String,

    /// Rendered GROUP BY terms; non-empty only when the projection
    /// aggregates.
    pub group_by: Vec<String>,

    pub order_by: Vec<OrderByColumn>,

    /// When set, declared joins are always retained in the emitted SQL even
    /// if logically unused.
    pub strict_joins: bool,

    /// Maps each nested-result-object property path to the composite key of
    /// the table supplying its grouping identity.
    pub property_keys: IndexMap<String, CompositeKey>,
}

impl SelectStatement {
    pub fn new(source: Source, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        let root = QueryTable {
            alias: alias.clone(),
            join: None,
            primary_key: CompositeKey::single(row_identity_alias(&alias)),
            joined_from: vec![],
        };

        let mut tables = IndexMap::new();
        tables.insert(alias.clone(), root);

        Self {
            source,
            alias,
            setup_sql: String::new(),
            tables,
            joins: vec![],
            select_columns: vec![],
            where_sql: None,
            where_setup_sql: String::new(),
            group_by: vec![],
            order_by: vec![],
            strict_joins: false,
            property_keys: IndexMap::new(),
        }
    }

    /// Exact-match table lookup.
    pub fn table(&self, alias: &str) -> Result<&QueryTable> {
        self.tables
            .get(alias)
            .ok_or_else(|| Error::unknown_alias("table", alias))
    }

    /// Exact-match select-column lookup.
    pub fn select_column(&self, alias: &str) -> Result<&SelectColumn> {
        self.select_columns
            .iter()
            .find(|column| column.alias == alias)
            .ok_or_else(|| Error::unknown_alias("select column", alias))
    }

    pub fn select_column_at(&self, index: usize) -> Result<&SelectColumn> {
        self.select_columns
            .get(index)
            .ok_or_else(|| Error::unknown_alias("select column", index.to_string()))
    }

    /// Ordinal position of a select column within the rendered SELECT list.
    pub fn column_index(&self, alias: &str) -> Result<usize> {
        self.select_columns
            .iter()
            .position(|column| column.alias == alias)
            .ok_or_else(|| Error::unknown_alias("select column", alias))
    }

    pub fn join(&self, alias: &str) -> Option<&Join> {
        self.joins.iter().find(|join| join.alias == alias)
    }

    /// Registers a join and its table.
    ///
    /// The ON-condition must reference previously declared tables only; the
    /// joined table's composite key is its referenced parents' identity
    /// followed by its own.
    pub fn add_join(&mut self, join: Join) -> Result<()> {
        if self.tables.contains_key(&join.alias) {
            return Err(Error::configuration(format!(
                "table alias `{}` is already registered",
                join.alias
            )));
        }

        let mut key: Option<CompositeKey> = None;
        for reference in &join.references {
            let parent = self.table(reference)?;
            key = Some(match key {
                Some(key) => CompositeKey::compose(&key, &parent.primary_key),
                None => parent.primary_key.clone(),
            });
        }

        let own = CompositeKey::single(row_identity_alias(&join.alias));
        let primary_key = match key {
            Some(parents) => CompositeKey::compose(&parents, &own),
            None => own,
        };

        let table = QueryTable {
            alias: join.alias.clone(),
            join: Some(join.kind),
            primary_key,
            joined_from: join.references.iter().cloned().collect(),
        };

        self.tables.insert(join.alias.clone(), table);
        self.joins.push(join);
        Ok(())
    }

    /// Injects the row-identity column for `table_alias` if it is not
    /// already selected.
    ///
    /// Identity columns are kept before user-selected columns, ordered by
    /// table declaration.
    pub fn ensure_row_identity(&mut self, table_alias: &str, sql: impl Into<String>) -> Result<()> {
        let alias = row_identity_alias(table_alias);
        if self.select_columns.iter().any(|c| c.alias == alias) {
            return Ok(());
        }

        let declaration_index = self
            .tables
            .get_index_of(table_alias)
            .ok_or_else(|| Error::unknown_alias("table", table_alias))?;

        let position = self
            .select_columns
            .iter()
            .take_while(|column| {
                column.row_identity
                    && column
                        .table
                        .as_deref()
                        .and_then(|t| self.tables.get_index_of(t))
                        .is_some_and(|index| index < declaration_index)
            })
            .count();

        self.select_columns.insert(
            position,
            SelectColumn::row_identity(alias, sql, table_alias),
        );
        Ok(())
    }

    /// The transitive join lineage of a table: the table itself plus,
    /// recursively, the lineage of every table its join ON-condition
    /// references. For any valid join graph this terminates and contains
    /// the root alias.
    pub fn lineage(&self, alias: &str) -> Result<IndexSet<String>> {
        let mut out = IndexSet::new();
        self.lineage_into(alias, &mut out)?;
        Ok(out)
    }

    fn lineage_into(&self, alias: &str, out: &mut IndexSet<String>) -> Result<()> {
        if !out.insert(alias.to_string()) {
            return Ok(());
        }
        if alias == self.alias {
            return Ok(());
        }
        let join = self.joins.iter().find(|join| join.alias == alias).ok_or_else(|| {
            Error::configuration(format!("cannot find join for table `{alias}`"))
        })?;
        for reference in &join.references {
            self.lineage_into(reference, out)?;
        }
        Ok(())
    }

    /// True if `ancestor` appears in the join lineage of `alias`.
    pub fn is_ancestor(&self, ancestor: &str, alias: &str) -> Result<bool> {
        if ancestor == alias {
            return Ok(false);
        }
        Ok(self.lineage(alias)?.contains(ancestor))
    }

    /// Removes joins, tables, and select columns whose owning table is not
    /// in the transitive lineage closure of the required aliases.
    ///
    /// A no-op in strict-joins mode. Idempotent: pruning twice with the same
    /// required set yields the same statement as pruning once.
    pub fn prune_unused(&mut self, required: &[String]) -> Result<()> {
        if self.strict_joins {
            return Ok(());
        }

        let mut closure = IndexSet::new();
        closure.insert(self.alias.clone());
        for alias in required {
            self.lineage_into(alias, &mut closure)?;
        }

        self.joins.retain(|join| closure.contains(&join.alias));
        self.tables.retain(|alias, _| closure.contains(alias));
        self.select_columns.retain(|column| match &column.table {
            Some(table) => closure.contains(table),
            None => true,
        });
        Ok(())
    }
}

/// Deterministic name of a table's synthesized row-identity column.
pub fn row_identity_alias(table_alias: &str) -> String {
    format!("{table_alias}{ROW_ID_TOKEN}")
}
