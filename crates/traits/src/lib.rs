pub mod sink;

pub use sink::{InMemorySinkFactory, SharedBuffer, Sink, SinkError, SinkFactory};
