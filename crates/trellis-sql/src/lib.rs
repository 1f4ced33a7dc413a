pub mod serializer;
pub use serializer::{Condition, ParamRegistry, Params, Placeholder, Serializer};
