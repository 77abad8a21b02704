use bytes::Bytes;
use std::future::Future;
use thiserror::Error;
use tokio::io::{AsyncWrite, AsyncWriteExt};

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("IO error while writing document: {0}")]
    Io(#[from] std::io::Error),
    #[error("Sink is closed")]
    Closed,
}

/// Destination for serialized documents.
pub trait DocumentSink: Send {
    fn send(&mut self, document: Bytes) -> impl Future<Output = Result<(), SinkError>> + Send;

    fn flush(&mut self) -> impl Future<Output = Result<(), SinkError>> + Send;
}

/// Writes one document per line to any async writer.
pub struct WriterSink<W> {
    writer: W,
    written: u64,
}

impl<W> WriterSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterSink<tokio::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(tokio::io::stdout())
    }
}

impl<W> DocumentSink for WriterSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn send(&mut self, document: Bytes) -> Result<(), SinkError> {
        self.writer.write_all(&document).await?;
        self.writer.write_all(b"\n").await?;
        self.written += 1;
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), SinkError> {
        self.writer.flush().await?;
        Ok(())
    }
}

/// Collects documents in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    documents: Vec<Bytes>,
    closed: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every subsequent send with [`SinkError::Closed`].
    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn documents(&self) -> &[Bytes] {
        &self.documents
    }

    pub fn into_documents(self) -> Vec<Bytes> {
        self.documents
    }
}

impl DocumentSink for MemorySink {
    async fn send(&mut self, document: Bytes) -> Result<(), SinkError> {
        if self.closed {
            return Err(SinkError::Closed);
        }
        self.documents.push(document);
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}
