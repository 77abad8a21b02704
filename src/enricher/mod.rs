//! Message enrichment: turns a [`LogEvent`](crate::domain::LogEvent) into the
//! canonical Logstash document.

pub mod builder;
pub mod timestamp;

pub use builder::{BuilderConfig, DEFAULT_LOG_TYPES, MessageBuilder, NO_MESSAGE, create_message};
pub use timestamp::format_timestamp;
