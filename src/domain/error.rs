use thiserror::Error;

/// Error returned by the message builder.
///
/// Every parsing problem upstream of serialization is absorbed into a
/// fallback value, so this only fires when the final encode fails.
#[derive(Error, Debug)]
pub enum EnrichError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
