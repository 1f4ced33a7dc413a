use super::{Formatter, ToSql};

use trellis_core::driver::Param;
use trellis_core::stmt::Value;
use trellis_core::{Error, Result};

/// Reserved textual flag appended to a placeholder that fans out into an
/// IN list at execution time.
pub(super) const IN_MARKER: &str = "__in";

/// Where rendered placeholders and their values are collected.
pub trait Params {
    /// Registers a constant captured at build time.
    fn push(&mut self, value: &Value) -> Placeholder;

    /// Registers a deferred argument bound at execution time.
    fn push_deferred(&mut self, arg_index: usize, fan_out: bool) -> Placeholder;
}

/// A rendered parameter placeholder, `@pN`, with an optional IN-expansion
/// marker suffix.
pub struct Placeholder {
    pub index: usize,
    pub fan_out: bool,
}

impl ToSql for Placeholder {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        use std::fmt::Write;

        write!(f.dst, "@p{}", self.index).unwrap();
        if self.fan_out {
            f.dst.push_str(IN_MARKER);
        }
    }
}

/// The ordered parameter list of a compiled statement.
///
/// Constants captured while lowering expressions sit next to deferred
/// arguments supplied at execution time; positions are assigned in
/// serialization order and are stable across executions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParamRegistry {
    entries: Vec<ParamEntry>,
}

#[derive(Debug, Clone, PartialEq)]
enum ParamEntry {
    Const(Value),
    Deferred { arg_index: usize, fan_out: bool },
}

impl Params for ParamRegistry {
    fn push(&mut self, value: &Value) -> Placeholder {
        self.entries.push(ParamEntry::Const(value.clone()));
        Placeholder {
            index: self.entries.len() - 1,
            fan_out: false,
        }
    }

    fn push_deferred(&mut self, arg_index: usize, fan_out: bool) -> Placeholder {
        self.entries.push(ParamEntry::Deferred { arg_index, fan_out });
        Placeholder {
            index: self.entries.len() - 1,
            fan_out,
        }
    }
}

impl ParamRegistry {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves bound arguments into the final ordered parameter list and
    /// rewrites every IN marker in `sql` into uniquely named placeholders,
    /// `@pN_0, @pN_1, …`, now that the bound lists' lengths are known.
    ///
    /// A fan-out parameter bound to a missing or non-list value is a fatal
    /// expression-shape error.
    pub fn bind(&self, sql: &str, args: &[Value]) -> Result<(String, Vec<Param>)> {
        let mut sql = sql.to_string();
        let mut params = Vec::with_capacity(self.entries.len());

        for (index, entry) in self.entries.iter().enumerate() {
            let name = format!("@p{index}");

            match entry {
                ParamEntry::Const(value) => params.push(Param::new(name, value.clone())),
                ParamEntry::Deferred { arg_index, fan_out } => {
                    let value = args.get(*arg_index).cloned().ok_or_else(|| {
                        Error::expression_shape(
                            "parameter",
                            format!("no argument bound at position {arg_index}"),
                        )
                    })?;

                    if *fan_out {
                        let items = value.into_list().map_err(|_| {
                            Error::expression_shape(
                                "IN",
                                format!("parameter {name} expects a list argument"),
                            )
                        })?;

                        let marker = format!("{name}{IN_MARKER}");
                        let expanded = if items.is_empty() {
                            // `IN ()` is not valid SQL; an empty list matches
                            // no row.
                            "NULL".to_string()
                        } else {
                            (0..items.len())
                                .map(|i| format!("{name}_{i}"))
                                .collect::<Vec<_>>()
                                .join(", ")
                        };
                        sql = sql.replace(&marker, &expanded);

                        for (i, item) in items.into_iter().enumerate() {
                            params.push(Param::new(format!("{name}_{i}"), item));
                        }
                    } else {
                        if value.is_list() {
                            return Err(Error::expression_shape(
                                "parameter",
                                format!("list argument bound to scalar parameter {name}"),
                            ));
                        }
                        params.push(Param::new(name, value));
                    }
                }
            }
        }

        Ok((sql, params))
    }
}
