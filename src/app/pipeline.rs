use crate::{
    domain::LogEvent,
    enricher::MessageBuilder,
    sender::{DocumentSink, SinkError},
};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to read input: {0}")]
    Input(#[from] std::io::Error),
    #[error("Failed to deliver document: {0}")]
    Sink(#[from] SinkError),
}

/// Outcome counters for one pipeline run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PipelineStats {
    /// Non-empty input lines seen.
    pub received: u64,
    /// Documents handed to the sink.
    pub forwarded: u64,
    /// Lines that did not decode as a log event.
    pub rejected: u64,
    /// Events whose document failed to serialize.
    pub skipped: u64,
}

/// Run the processing loop: read NDJSON events → enrich → send.
///
/// Stops at end of input or when `cancel` fires, flushing the sink either way.
pub async fn run_pipeline<R, S>(
    reader: R,
    builder: &MessageBuilder,
    sink: &mut S,
    cancel: CancellationToken,
) -> Result<PipelineStats, PipelineError>
where
    R: AsyncRead + Unpin,
    S: DocumentSink,
{
    let mut reader = BufReader::new(reader);
    let mut line = Vec::new();
    let mut stats = PipelineStats::default();

    info!("Starting enrichment loop");

    loop {
        line.clear();
        let read = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                info!("Received shutdown signal, stopping enrichment loop");
                break;
            }
            read = reader.read_until(b'\n', &mut line) => read?,
        };

        if read == 0 {
            debug!("End of input reached");
            break;
        }

        if line.trim_ascii().is_empty() {
            continue;
        }
        stats.received += 1;

        // Raw bytes, so a line that is not UTF-8 is rejected like any other bad line.
        let event: LogEvent = match serde_json::from_slice(&line) {
            Ok(event) => event,
            Err(e) => {
                warn!(error = %e, "Rejecting malformed log event");
                stats.rejected += 1;
                continue;
            }
        };

        match builder.build_message(&event) {
            Ok(document) => {
                sink.send(document).await?;
                stats.forwarded += 1;
            }
            Err(e) => {
                warn!(container_id = %event.container_id, error = %e, "Skipping log event");
                stats.skipped += 1;
            }
        }
    }

    sink.flush().await?;

    info!(
        received = stats.received,
        forwarded = stats.forwarded,
        rejected = stats.rejected,
        skipped = stats.skipped,
        "Enrichment loop stopped"
    );

    Ok(stats)
}
