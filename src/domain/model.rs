use std::collections::HashSet;

use super::DownloadError;

/// One file to fetch: where it lands locally and where it comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadItem {
    pub target_path: String,
    pub source_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Success { item: DownloadItem },
    Failure { item: DownloadItem, error: DownloadError },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedItem {
    pub item: DownloadItem,
    pub error: DownloadError,
}

/// Tally of a finished batch. `success_count + failures.len()` equals the
/// number of submitted items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResult {
    pub success_count: usize,
    pub failures: Vec<FailedItem>,
}

impl BatchResult {
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub fn total(&self) -> usize {
        self.success_count + self.failures.len()
    }
}

/// Case-insensitive extension allow-list. An empty list admits everything.
#[derive(Debug, Clone, Default)]
pub struct ExtensionFilter {
    allowed: HashSet<String>,
}

impl ExtensionFilter {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            allowed: extensions
                .into_iter()
                .map(|ext| ext.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn allows_all(&self) -> bool {
        self.allowed.is_empty()
    }

    pub fn allows(&self, extension: &str) -> bool {
        self.allows_all() || self.allowed.contains(&extension.to_lowercase())
    }
}
