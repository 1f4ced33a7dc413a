#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::Comma;

mod flavor;
use flavor::Flavor;

mod ident;
use ident::Ident;

mod params;
pub use params::{ParamRegistry, Params, Placeholder};

// Fragment serializers
mod expr;
mod statement;

use trellis_core::stmt::{Expr, ROW_ID_TOKEN};
use trellis_core::{Error, Result};

use indexmap::IndexSet;

/// A lowered condition: SQL text plus the table aliases it references.
///
/// The reference set drives join validation (an ON-condition must reference
/// at least one prior table) and unused-table pruning.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub sql: String,
    pub references: IndexSet<String>,
}

/// Serialize statements and expressions to SQL text.
#[derive(Debug)]
pub struct Serializer {
    /// The database flavor handles the differences between SQL dialects.
    flavor: Flavor,
}

struct Formatter<'a, T> {
    /// Handle to the serializer
    serializer: &'a Serializer,

    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut T,

    /// Table aliases referenced so far
    references: &'a mut IndexSet<String>,
}

impl Serializer {
    /// Lowers a condition expression into SQL text, registering parameters
    /// and collecting the table aliases it references.
    ///
    /// `clause` tags errors with the clause being built, e.g. "WHERE" or
    /// "JOIN ON". A condition must reduce to exactly one top-level SQL
    /// segment; a multi-segment comma list is a fatal expression-shape
    /// error.
    pub fn serialize_condition(
        &self,
        clause: &str,
        expr: &Expr,
        params: &mut impl Params,
    ) -> Result<Condition> {
        let expr = match expr {
            Expr::List(list) => {
                if list.items.len() != 1 {
                    return Err(Error::expression_shape(
                        clause,
                        format!(
                            "condition must reduce to exactly 1 SQL segment, found {}",
                            list.items.len()
                        ),
                    ));
                }
                &list.items[0]
            }
            other => other,
        };

        let mut sql = String::new();
        let mut references = IndexSet::new();
        let mut f = Formatter {
            serializer: self,
            dst: &mut sql,
            params,
            references: &mut references,
        };

        expr.to_sql(&mut f);

        Ok(Condition { sql, references })
    }

    /// SQL referencing a table's synthesized row-identity column.
    pub fn row_identity_sql(&self, table_alias: &str) -> String {
        format!(
            "{}.{}",
            self.flavor.quote(table_alias),
            self.flavor.quote(ROW_ID_TOKEN)
        )
    }

    /// Quotes an identifier in the active dialect.
    pub fn quote(&self, ident: &str) -> String {
        self.flavor.quote(ident)
    }
}
