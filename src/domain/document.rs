use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Top-level keys owned by the enricher. Payload promotion never writes these.
pub const RESERVED_KEYS: &[&str] = &["@timestamp", "@type", "host", "message", "docker", "logtype"];

/// Logstash-shaped document produced for every log event.
///
/// Fixed fields serialize first, followed by the promoted payload fields in
/// key order, so identical input always yields identical bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedDocument {
    #[serde(rename = "@timestamp")]
    pub timestamp: String,
    #[serde(rename = "@type", default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    pub host: String,
    pub message: String,
    pub docker: DockerFields,
    /// Only set when the payload declared a recognized log type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logtype: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// The nested `docker` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockerFields {
    pub name: String,
    pub cid: String,
    pub image: String,
    pub image_tag: String,
    pub source: String,
    pub docker_host: String,
}

impl EnrichedDocument {
    pub fn is_reserved(key: &str) -> bool {
        RESERVED_KEYS.contains(&key)
    }

    /// Look up a promoted payload field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}
