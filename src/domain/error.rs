use thiserror::Error;

/// Why a single download item failed. Never fatal to the batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DownloadError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("HTTP Status Code is not 200 ({code})")]
    UnexpectedStatus { code: u16 },

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Download task aborted: {0}")]
    Aborted(String),
}
