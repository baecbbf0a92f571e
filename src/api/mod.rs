pub mod client;
pub mod models;

pub use client::DownloadClient;
pub use models::{read_export, Message};
