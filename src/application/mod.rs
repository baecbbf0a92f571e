pub mod download_coordinator;
pub mod downloader;
pub mod extractor;
pub mod report;

pub use download_coordinator::DownloadCoordinator;
pub use downloader::HttpDownloader;
pub use extractor::extract_items;
pub use report::log_report;
