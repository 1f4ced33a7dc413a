use super::Direction;

/// One ORDER BY term, already lowered to SQL text.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderByColumn {
    pub sql: String,
    pub direction: Direction,
}
