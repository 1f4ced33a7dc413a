use indexmap::IndexSet;

/// How a table is joined into the statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
}

impl JoinKind {
    pub fn keyword(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
        }
    }
}

/// One JOIN clause of a statement.
///
/// The ON-condition has already been lowered to SQL text; `references` holds
/// the table aliases the condition mentions, which drives lineage closure
/// and unused-join pruning.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    /// Alias the joined table is exposed under.
    pub alias: String,

    /// Physical table being joined.
    pub table: String,

    pub kind: JoinKind,

    /// Lowered ON-condition SQL.
    pub on_sql: String,

    /// Statements that must run before the main query, e.g. materializing
    /// the join's source as a numbered subquery. Usually empty.
    pub setup_sql: String,

    /// Table aliases referenced by the ON-condition, this join's own alias
    /// excluded.
    pub references: IndexSet<String>,
}
