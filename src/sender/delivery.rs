//! JSON-lines delivery backend
//!
//! Writes every batch as a single line of JSON. The CLI uses it in place of a
//! network transport, pointing it at a file or stdout.

use crate::sender::batch::Batch;
use crate::sender::error::SenderResult;
use crate::sender::traits::BatchDelivery;
use async_trait::async_trait;
use std::path::Path;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

pub struct JsonLinesDelivery<W> {
    writer: Mutex<W>,
}

impl<W> JsonLinesDelivery<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl JsonLinesDelivery<tokio::fs::File> {
    /// Open `path` for appending, creating it if needed
    pub async fn append_to(path: &Path) -> SenderResult<Self> {
        let file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;
        Ok(Self::new(file))
    }
}

#[async_trait]
impl<W> BatchDelivery for JsonLinesDelivery<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn deliver(&self, batch: &Batch) -> SenderResult<()> {
        let mut line = serde_json::to_vec(batch)?;
        line.push(b'\n');

        let mut writer = self.writer.lock().await;
        writer.write_all(&line).await?;
        writer.flush().await?;
        Ok(())
    }
}
