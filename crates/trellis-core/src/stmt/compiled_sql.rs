/// The four-fragment compiled SQL output.
///
/// The caller concatenates `before_where_sql`, `where_sql`, and
/// `after_where_sql` (after applying IN-marker substitution) to form the
/// executable statement; `setup_sql` runs first as separate statements.
///
/// The split exists so an outer query can splice an inner query's text into
/// its own FROM-subquery without re-parsing SQL.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompiledSql {
    /// Statements that must run before the main query.
    pub setup_sql: String,

    /// SELECT list, FROM, and JOIN clauses.
    pub before_where_sql: String,

    /// The WHERE clause, leading space included; empty when the statement
    /// has none or when the WHERE lives inside a wrapped inner query.
    pub where_sql: String,

    /// GROUP BY and ORDER BY clauses, leading space included.
    pub after_where_sql: String,
}

impl CompiledSql {
    /// The executable statement text, IN-markers still in place.
    pub fn statement_sql(&self) -> String {
        let mut sql = String::with_capacity(
            self.before_where_sql.len() + self.where_sql.len() + self.after_where_sql.len(),
        );
        sql.push_str(&self.before_where_sql);
        sql.push_str(&self.where_sql);
        sql.push_str(&self.after_where_sql);
        sql
    }
}
