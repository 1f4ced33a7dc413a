use super::Expr;

/// A reference to a positionally bound parameter.
///
/// A parameter whose argument is enumerable is flagged for IN-clause
/// fan-out: the rendered placeholder carries a reserved marker that is
/// rewritten into `@pN_0, @pN_1, …` once the bound list's length is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExprParam {
    /// Zero-based position in the ordered parameter list.
    pub index: usize,

    /// True if the parameter expands into an IN list at execution time.
    pub fan_out: bool,
}

impl Expr {
    pub fn param(index: usize) -> Self {
        ExprParam {
            index,
            fan_out: false,
        }
        .into()
    }

    /// A parameter that fans out into an IN list at execution time.
    pub fn param_list(index: usize) -> Self {
        ExprParam {
            index,
            fan_out: true,
        }
        .into()
    }
}

impl From<ExprParam> for Expr {
    fn from(value: ExprParam) -> Self {
        Self::Param(value)
    }
}
