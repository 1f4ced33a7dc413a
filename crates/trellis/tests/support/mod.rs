#![allow(dead_code)]

use trellis::driver::{Executor, Param, Rows};
use trellis::stmt::Value;
use trellis::{async_trait, Result};

use std::sync::Mutex;

/// In-memory executor returning canned rows and recording every call.
#[derive(Debug, Default)]
pub struct FakeExecutor {
    rows: Mutex<Vec<Vec<Value>>>,
    calls: Mutex<Vec<(String, Vec<Param>)>>,
}

impl FakeExecutor {
    pub fn with_rows(rows: Vec<Vec<Value>>) -> Self {
        Self {
            rows: Mutex::new(rows),
            calls: Mutex::new(vec![]),
        }
    }

    pub fn calls(&self) -> Vec<(String, Vec<Param>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Executor for FakeExecutor {
    async fn execute(&self, sql: &str, params: &[Param]) -> Result<Rows> {
        self.calls
            .lock()
            .unwrap()
            .push((sql.to_string(), params.to_vec()));
        Ok(Rows::new(self.rows.lock().unwrap().clone()))
    }
}
