mod error;
pub use error::Error;

pub mod driver;
pub use driver::Executor;

pub mod graph;

pub mod stmt;

/// A Result type alias that uses Trellis' [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
