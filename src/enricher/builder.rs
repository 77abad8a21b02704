use super::timestamp::format_timestamp;
use crate::domain::{DockerFields, EnrichError, EnrichedDocument, LogEvent};
use crate::parser::{ImageReference, Payload, classify};
use bytes::Bytes;
use serde_json::Map;
use std::collections::BTreeSet;
use tracing::debug;

/// Message used when a JSON payload carries no string `message`.
pub const NO_MESSAGE: &str = "no message";

/// Log types recognized when nothing else is configured.
pub const DEFAULT_LOG_TYPES: &[&str] = &["applog"];

/// Everything the builder needs besides the event itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderConfig {
    /// Identifier of the host doing the reporting, written to `docker.docker_host`.
    pub reporting_host: String,
    /// Omit `@type` entirely instead of writing `type_label`.
    pub suppress_type: bool,
    pub type_label: String,
    /// Allow-list for the payload's self-declared `logtype`.
    pub log_types: BTreeSet<String>,
}

impl BuilderConfig {
    pub fn new(reporting_host: impl Into<String>, type_label: impl Into<String>) -> Self {
        Self {
            reporting_host: reporting_host.into(),
            suppress_type: false,
            type_label: type_label.into(),
            log_types: DEFAULT_LOG_TYPES.iter().map(|t| (*t).to_string()).collect(),
        }
    }

    pub fn with_suppress_type(mut self, suppress_type: bool) -> Self {
        self.suppress_type = suppress_type;
        self
    }

    pub fn with_log_types<I, S>(mut self, log_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.log_types = log_types.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_recognized(&self, logtype: &str) -> bool {
        self.log_types.contains(logtype)
    }
}

/// Builds Logstash documents from log events.
///
/// Holds only immutable configuration, so one builder can be shared freely
/// across tasks and threads.
#[derive(Debug, Clone)]
pub struct MessageBuilder {
    config: BuilderConfig,
}

impl MessageBuilder {
    pub fn new(config: BuilderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Assemble the document for `event` without serializing it.
    pub fn build(&self, event: &LogEvent) -> EnrichedDocument {
        let image = ImageReference::parse(&event.image);

        let mut document = EnrichedDocument {
            timestamp: format_timestamp(&event.timestamp),
            doc_type: (!self.config.suppress_type).then(|| self.config.type_label.clone()),
            host: event.hostname.clone(),
            message: event.raw_data.clone(),
            docker: DockerFields {
                name: event.name().to_string(),
                cid: event.container_id.clone(),
                image: image.name,
                image_tag: image.tag,
                source: event.source.clone(),
                docker_host: self.config.reporting_host.clone(),
            },
            logtype: None,
            fields: Map::new(),
        };

        let payload = classify(&event.raw_data);
        let Payload::Object(ref fields) = payload else {
            return document;
        };

        document.message = payload.message().unwrap_or(NO_MESSAGE).to_string();

        match payload.logtype() {
            Some(logtype) if self.config.is_recognized(logtype) => {
                document.logtype = Some(logtype.to_string());
            }
            Some(logtype) => {
                debug!(
                    container_id = %event.container_id,
                    logtype,
                    "Dropping unrecognized logtype"
                );
            }
            None => {}
        }

        // Fixed fields are already in place; reserved names are never overwritten.
        for (key, value) in fields {
            if !EnrichedDocument::is_reserved(key) {
                document.fields.insert(key.clone(), value.clone());
            }
        }

        document
    }

    /// Build and serialize the document for `event` to JSON bytes.
    pub fn build_message(&self, event: &LogEvent) -> Result<Bytes, EnrichError> {
        let document = self.build(event);
        let encoded = serde_json::to_vec(&document)?;
        Ok(Bytes::from(encoded))
    }
}

/// One-shot form of [`MessageBuilder::build_message`] using the default
/// recognized log types.
pub fn create_message(
    event: &LogEvent,
    reporting_host: &str,
    suppress_type: bool,
    type_label: &str,
) -> Result<Bytes, EnrichError> {
    let config = BuilderConfig::new(reporting_host, type_label).with_suppress_type(suppress_type);
    MessageBuilder::new(config).build_message(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::Value;

    fn event_with_data(data: &str) -> LogEvent {
        LogEvent {
            container_id: "6feffd9428dc".to_string(),
            container_name: "/my_app".to_string(),
            hostname: "container_hostname".to_string(),
            image: "my.registry.host:443/path/to/image:1234".to_string(),
            source: "stdout".to_string(),
            raw_data: data.to_string(),
            timestamp: Utc.timestamp_opt(1_453_818_496, 595_000_000).unwrap(),
        }
    }

    fn builder() -> MessageBuilder {
        MessageBuilder::new(BuilderConfig::new("tst-mesos-slave-001", "my-type"))
    }

    #[test]
    fn test_fixed_fields_for_plain_text() {
        let doc = builder().build(&event_with_data("hello world"));

        assert_eq!(doc.timestamp, "2016-01-26T14:28:16.595Z");
        assert_eq!(doc.doc_type.as_deref(), Some("my-type"));
        assert_eq!(doc.host, "container_hostname");
        assert_eq!(doc.message, "hello world");
        assert_eq!(doc.docker.name, "my_app");
        assert_eq!(doc.docker.image, "my.registry.host:443/path/to/image");
        assert_eq!(doc.docker.image_tag, "1234");
        assert_eq!(doc.docker.docker_host, "tst-mesos-slave-001");
        assert!(doc.logtype.is_none());
        assert!(doc.fields.is_empty());
    }

    #[test]
    fn test_registry_port_is_not_a_tag() {
        let event = LogEvent {
            image: "my.registry.host:443/path/to/image".to_string(),
            ..event_with_data("x")
        };

        let doc = builder().build(&event);

        assert_eq!(doc.docker.image, "my.registry.host:443/path/to/image");
        assert_eq!(doc.docker.image_tag, "");
    }

    #[test]
    fn test_suppressed_type_is_absent() {
        let config = BuilderConfig::new("host", "ignored").with_suppress_type(true);
        let doc = MessageBuilder::new(config).build(&event_with_data("x"));
        assert!(doc.doc_type.is_none());
    }

    #[test]
    fn test_payload_cannot_override_fixed_fields() {
        let doc = builder().build(&event_with_data(
            r#"{"message":"m","host":"evil","docker":{"cid":"x"},"@timestamp":"never","@type":"t"}"#,
        ));

        assert_eq!(doc.host, "container_hostname");
        assert_eq!(doc.docker.cid, "6feffd9428dc");
        assert_eq!(doc.timestamp, "2016-01-26T14:28:16.595Z");
        assert_eq!(doc.doc_type.as_deref(), Some("my-type"));
        assert!(doc.fields.is_empty());
    }

    #[test]
    fn test_non_string_message_falls_back() {
        let doc = builder().build(&event_with_data(r#"{"message": {"nested": true}}"#));
        assert_eq!(doc.message, NO_MESSAGE);
    }

    #[test]
    fn test_recognized_logtype_promotes_payload() {
        let doc = builder().build(&event_with_data(
            r#"{"logtype":"applog","message":"ok","level":"DEBUG","line":42}"#,
        ));

        assert_eq!(doc.logtype.as_deref(), Some("applog"));
        assert_eq!(doc.field("level"), Some(&Value::from("DEBUG")));
        assert_eq!(doc.field("line"), Some(&Value::from(42)));
    }

    #[test]
    fn test_custom_log_types() {
        let config = BuilderConfig::new("host", "t").with_log_types(["accesslog"]);
        let builder = MessageBuilder::new(config);

        let access = builder.build(&event_with_data(r#"{"logtype":"accesslog"}"#));
        let app = builder.build(&event_with_data(r#"{"logtype":"applog"}"#));

        assert_eq!(access.logtype.as_deref(), Some("accesslog"));
        assert!(app.logtype.is_none());
    }

    #[test]
    fn test_create_message_matches_builder() {
        let event = event_with_data("hello world");
        let direct = create_message(&event, "tst-mesos-slave-001", false, "my-type").unwrap();
        let built = builder().build_message(&event).unwrap();
        assert_eq!(direct, built);
    }
}
