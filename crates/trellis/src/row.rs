use trellis_core::stmt::{Ty, Value};
use trellis_core::{Error, Result};

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

/// Decodes one raw result row into typed values.
///
/// The strategy seam for row decoding: the default implementation checks
/// values directly against declared types; a specialized implementation can
/// be selected behind the same interface.
pub trait RowDecoder: Send + Sync + 'static {
    fn decode(&self, row: Vec<Value>) -> Result<Vec<Value>>;
}

/// The default decoder: checks each value against the declared column type,
/// widening where lossless and failing on any mismatch.
///
/// Type errors here indicate a schema/mapping mismatch, not a transient
/// fault; they are surfaced when materializing and never retried.
#[derive(Debug)]
pub struct TypedRowDecoder {
    columns: Vec<Ty>,
}

impl TypedRowDecoder {
    pub fn new(columns: Vec<Ty>) -> Self {
        Self { columns }
    }
}

impl RowDecoder for TypedRowDecoder {
    fn decode(&self, row: Vec<Value>) -> Result<Vec<Value>> {
        if row.len() != self.columns.len() {
            return Err(Error::configuration(format!(
                "row width {} does not match select list width {}",
                row.len(),
                self.columns.len()
            )));
        }

        row.into_iter()
            .zip(&self.columns)
            .map(|(value, ty)| coerce(value, ty))
            .collect()
    }
}

fn coerce(value: Value, ty: &Ty) -> Result<Value> {
    if value.is_null() {
        return if ty.is_nullable() {
            Ok(Value::Null)
        } else {
            Err(Error::type_conversion(value, ty.to_string()))
        };
    }

    match (value, ty.base()) {
        (value @ Value::Bool(_), Ty::Bool) => Ok(value),
        (value @ Value::I32(_), Ty::I32) => Ok(value),
        // Widening from i32 is lossless
        (Value::I32(value), Ty::I64) => Ok(Value::I64(value as i64)),
        (value @ Value::I64(_), Ty::I64) => Ok(value),
        (value @ Value::F64(_), Ty::F64) => Ok(value),
        (value @ Value::String(_), Ty::String) => Ok(value),
        (value @ Value::Bytes(_), Ty::Bytes) => Ok(value),
        (value, _) => Err(Error::type_conversion(value, ty.to_string())),
    }
}

/// Memoizes row decoders by row-type signature.
///
/// An explicit service object, constructor-injected where needed rather
/// than a global. Instantiation is single-flight: at most one decoder is
/// built per unique signature, and concurrent callers share the in-flight
/// result.
#[derive(Debug, Default)]
pub struct DecoderCache {
    decoders: Mutex<HashMap<Vec<Ty>, Arc<OnceLock<Arc<TypedRowDecoder>>>>>,
}

impl DecoderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The decoder for the given row signature, building it on first use.
    pub fn decoder(&self, signature: Vec<Ty>) -> Arc<TypedRowDecoder> {
        let slot = {
            let mut decoders = self.decoders.lock().unwrap();
            decoders.entry(signature.clone()).or_default().clone()
        };

        // The slot lock is held per signature: concurrent callers for the
        // same shape wait for one initialization instead of duplicating it.
        slot.get_or_init(|| Arc::new(TypedRowDecoder::new(signature)))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.decoders.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
