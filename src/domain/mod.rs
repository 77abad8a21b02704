//! Domain layer for rask-log-enricher.
//!
//! Contains the canonical types shared across all modules:
//! - `LogEvent`: One line of container output plus its metadata
//! - `EnrichedDocument`: The Logstash-shaped document produced for each event
//! - `EnrichError`: Failure of the message builder

pub mod document;
pub mod error;
pub mod log_event;

pub use document::{DockerFields, EnrichedDocument};
pub use error::EnrichError;
pub use log_event::LogEvent;
