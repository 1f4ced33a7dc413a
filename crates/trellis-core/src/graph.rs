mod object_graph;
pub use object_graph::{ObjectGraph, RootObjectPropertyGraph};

mod property;
pub use property::{ComplexProperty, PropertyBinding, SimpleProperty};
