use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Top level of a chat export. Only the parts the downloader needs are modelled.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportedJson {
    #[serde(default)]
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub timestamp: String,
    pub author: Author,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Author {
    pub id: String,
    #[serde(rename = "isBot", default)]
    pub is_bot: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Attachment {
    #[serde(rename = "fileName")]
    pub file_name: String,
    pub url: String,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to read JSON file {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("Failed to parse JSON file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Read and decode an exported chat log.
pub fn read_export(path: &Path) -> Result<ExportedJson, ExportError> {
    let raw = fs::read(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_slice(&raw).map_err(|source| ExportError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
