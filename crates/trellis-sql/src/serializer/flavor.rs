use super::Serializer;

use trellis_core::stmt::BinaryOp;

/// The database flavor handles the differences between SQL dialects:
/// identifier quoting, the descending keyword, and operator spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Flavor {
    Postgresql,
    Sqlite,
    Mysql,
}

impl Flavor {
    /// Quotes a table/column/alias identifier.
    pub(super) fn quote(self, ident: &str) -> String {
        match self {
            // MySQL uses backticks; the ANSI flavors use double quotes.
            Flavor::Mysql => format!("`{ident}`"),
            Flavor::Postgresql | Flavor::Sqlite => format!("\"{ident}\""),
        }
    }

    /// Spelling of the descending sort keyword.
    pub(super) fn desc(self) -> &'static str {
        "DESC"
    }

    /// Spelling of a binary operator.
    pub(super) fn binary_op(self, op: BinaryOp) -> &'static str {
        match op {
            BinaryOp::Eq => "=",
            BinaryOp::Ne => "<>",
            BinaryOp::Ge => ">=",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Lt => "<",
            BinaryOp::And => "AND",
            BinaryOp::Or => "OR",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }
}

impl Serializer {
    pub fn postgresql() -> Serializer {
        Serializer {
            flavor: Flavor::Postgresql,
        }
    }

    pub fn sqlite() -> Serializer {
        Serializer {
            flavor: Flavor::Sqlite,
        }
    }

    pub fn mysql() -> Serializer {
        Serializer {
            flavor: Flavor::Mysql,
        }
    }

    pub(super) fn is_mysql(&self) -> bool {
        matches!(self.flavor, Flavor::Mysql)
    }
}
