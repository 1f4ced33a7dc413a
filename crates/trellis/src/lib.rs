mod builder;
pub use builder::{MappedQuery, Query, QueryBuilder};

mod compiled;
pub use compiled::CompiledQuery;

mod graph;

mod projection;
pub use projection::{ProjectedProperty, Projection};

mod resolver;

mod row;
pub use row::{DecoderCache, RowDecoder, TypedRowDecoder};

pub use trellis_core::{async_trait, driver, graph as object_graph, stmt, Error, Result};
pub use trellis_sql::Serializer;
