use std::path::PathBuf;

use async_trait::async_trait;
use futures::StreamExt;
use tokio::io::AsyncWriteExt;

use crate::{
    api::DownloadClient,
    domain::{DownloadError, DownloadItem, DownloadOutcome},
};

/// Fetches one item to local storage.
#[async_trait]
pub trait Downloader: Send + Sync {
    async fn download(&self, item: &DownloadItem) -> Result<(), DownloadError>;

    async fn attempt(&self, item: DownloadItem) -> DownloadOutcome {
        match self.download(&item).await {
            Ok(()) => DownloadOutcome::Success { item },
            Err(error) => DownloadOutcome::Failure { item, error },
        }
    }
}

/// Streams the response body into `output_dir/target_path`, replacing
/// whatever is there. A failed transfer may leave a partial file behind.
#[derive(Clone)]
pub struct HttpDownloader {
    client: DownloadClient,
    output_dir: PathBuf,
}

impl HttpDownloader {
    pub fn new(client: DownloadClient, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            output_dir: output_dir.into(),
        }
    }
}

#[async_trait]
impl Downloader for HttpDownloader {
    async fn download(&self, item: &DownloadItem) -> Result<(), DownloadError> {
        let mut stream = self.client.open_stream(&item.source_url).await?;

        let path = self.output_dir.join(&item.target_path);
        let mut file = tokio::fs::File::create(&path).await.map_err(|e| {
            DownloadError::Io(format!("Failed to create {}: {}", path.display(), e))
        })?;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await.map_err(|e| {
                DownloadError::Io(format!("Write error on {}: {}", path.display(), e))
            })?;
        }

        file.sync_all().await.map_err(|e| {
            DownloadError::Io(format!("Failed to sync {}: {}", path.display(), e))
        })?;

        Ok(())
    }
}
