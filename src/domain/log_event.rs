use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single log line emitted by a container, as handed over by the log router.
///
/// On the NDJSON input wire each event is one JSON object with these
/// snake_case field names and an RFC 3339 `timestamp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEvent {
    pub container_id: String,
    /// Container name as reported by the runtime, usually with a leading `/`.
    pub container_name: String,
    /// Hostname configured inside the container.
    pub hostname: String,
    /// Raw image reference, e.g. `my.registry.host:443/path/to/image:1.2`.
    pub image: String,
    /// Stream label ("stdout" / "stderr"), passed through untouched.
    pub source: String,
    pub raw_data: String,
    pub timestamp: DateTime<Utc>,
}

impl LogEvent {
    /// Container name without the runtime's leading `/`.
    pub fn name(&self) -> &str {
        self.container_name
            .strip_prefix('/')
            .unwrap_or(&self.container_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event_named(name: &str) -> LogEvent {
        LogEvent {
            container_id: "6feffd9428dc".to_string(),
            container_name: name.to_string(),
            hostname: "container_hostname".to_string(),
            image: "foo:latest".to_string(),
            source: "stdout".to_string(),
            raw_data: "hello".to_string(),
            timestamp: Utc.timestamp_opt(1_453_818_496, 0).unwrap(),
        }
    }

    #[test]
    fn test_name_strips_single_leading_slash() {
        assert_eq!(event_named("/my_app").name(), "my_app");
        assert_eq!(event_named("my_app").name(), "my_app");
        assert_eq!(event_named("//nested").name(), "/nested");
        assert_eq!(event_named("").name(), "");
    }

    #[test]
    fn test_event_decodes_from_ndjson_line() {
        let line = r#"{"container_id":"abc","container_name":"/web","hostname":"web-1","image":"nginx:1.25","source":"stderr","raw_data":"boom","timestamp":"2016-01-26T14:28:16.595Z"}"#;

        let event: LogEvent = serde_json::from_str(line).unwrap();

        assert_eq!(event.container_id, "abc");
        assert_eq!(event.name(), "web");
        assert_eq!(event.source, "stderr");
        assert_eq!(event.timestamp.timestamp_subsec_millis(), 595);
    }
}
