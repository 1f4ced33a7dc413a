/// Aggregation classification of an expression.
///
/// Classification is monotone under composition: combining two expressions
/// where either side is aggregated or contains an aggregated part never
/// yields [`Aggregation::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Aggregation {
    /// No aggregate function anywhere in the expression.
    #[default]
    None,

    /// The expression itself is an aggregate call (SUM/COUNT/AVG/MIN/MAX).
    Aggregated,

    /// The expression is a composition with at least one aggregated operand.
    ContainsAggregatedPart,
}

impl Aggregation {
    /// Combines the classification of two sub-expressions.
    pub fn combine(self, other: Aggregation) -> Aggregation {
        match (self, other) {
            (Aggregation::None, Aggregation::None) => Aggregation::None,
            _ => Aggregation::ContainsAggregatedPart,
        }
    }

    /// True if the expression is an aggregate call or contains one.
    pub fn is_aggregated(self) -> bool {
        !matches!(self, Aggregation::None)
    }
}
