use crate::{async_trait, stmt::Value, Result};

use std::collections::VecDeque;
use std::fmt::Debug;

/// One ordered (name, value) parameter pair bound to a statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub value: Value,
}

impl Param {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Result rows from executing a statement.
#[derive(Debug, Default)]
pub struct Rows {
    rows: VecDeque<Vec<Value>>,
}

impl Rows {
    pub fn new(rows: Vec<Vec<Value>>) -> Self {
        Self { rows: rows.into() }
    }

    /// The next raw row, or `None` once exhausted.
    pub fn next_row(&mut self) -> Option<Vec<Value>> {
        self.rows.pop_front()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<Vec<Vec<Value>>> for Rows {
    fn from(rows: Vec<Vec<Value>>) -> Self {
        Self::new(rows)
    }
}

/// Execution boundary to a concrete database driver.
///
/// The core issues one request per execution and awaits one response; it
/// never manages connections or transactions, and implements no retries or
/// cancellation.
#[async_trait]
pub trait Executor: Debug + Send + Sync + 'static {
    /// Execute a single SQL statement with ordered parameters.
    async fn execute(&self, sql: &str, params: &[Param]) -> Result<Rows>;
}
