//! Delivery side of the enricher.
//!
//! The enricher itself only produces bytes; a [`DocumentSink`] decides where
//! they go. The binary writes NDJSON to stdout, tests collect in memory.

pub mod sink;

pub use sink::{DocumentSink, MemorySink, SinkError, WriterSink};
