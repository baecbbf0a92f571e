pub mod error;
pub mod model;

pub use error::DownloadError;
pub use model::{BatchResult, DownloadItem, DownloadOutcome, ExtensionFilter, FailedItem};
