use std::sync::{Arc, Mutex, PoisonError};

use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{debug, info};

use super::downloader::Downloader;
use crate::domain::{BatchResult, DownloadError, DownloadItem, DownloadOutcome, FailedItem};

/// Runs a batch of downloads with at most `max_parallelism` in flight.
///
/// Every item gets its own task and is attempted exactly once. A task holds an
/// admission permit only while its download runs. There is no timeout: a hung
/// transfer holds up [`DownloadCoordinator::run`] until the transport gives up.
pub struct DownloadCoordinator<D> {
    downloader: Arc<D>,
    max_parallelism: usize,
}

impl<D: Downloader + 'static> DownloadCoordinator<D> {
    pub fn new(downloader: D, max_parallelism: usize) -> Self {
        Self {
            downloader: Arc::new(downloader),
            max_parallelism: max_parallelism.clamp(1, Semaphore::MAX_PERMITS),
        }
    }

    /// Download everything and wait for the last task to finish.
    /// Failures come back in submission order.
    pub async fn run(&self, items: Vec<DownloadItem>) -> BatchResult {
        let total = items.len();
        debug!(
            "Dispatching {} item(s), at most {} at a time",
            total, self.max_parallelism
        );
        let permits = Arc::new(Semaphore::new(self.max_parallelism));
        let collector = Arc::new(OutcomeCollector::default());

        let mut pending = Vec::with_capacity(total);
        for (index, item) in items.into_iter().enumerate() {
            let fallback = item.clone();
            let permits = Arc::clone(&permits);
            let collector = Arc::clone(&collector);
            let downloader = Arc::clone(&self.downloader);

            let handle = tokio::spawn(async move {
                let outcome = match permits.acquire_owned().await {
                    Ok(_permit) => {
                        info!("{}", item.target_path);
                        downloader.attempt(item).await
                    }
                    Err(e) => DownloadOutcome::Failure {
                        item,
                        error: DownloadError::Aborted(e.to_string()),
                    },
                };
                collector.record(index, outcome);
            });

            pending.push((index, fallback, handle));
        }

        let (meta, handles): (Vec<_>, Vec<_>) = pending
            .into_iter()
            .map(|(index, item, handle)| ((index, item), handle))
            .unzip();

        for ((index, item), joined) in meta.into_iter().zip(join_all(handles).await) {
            if let Err(e) = joined {
                collector.record(
                    index,
                    DownloadOutcome::Failure {
                        item,
                        error: DownloadError::Aborted(e.to_string()),
                    },
                );
            }
        }

        let result = collector.finish();
        debug_assert_eq!(result.total(), total);
        result
    }
}

#[derive(Default)]
struct OutcomeCollector {
    state: Mutex<CollectedOutcomes>,
}

#[derive(Default)]
struct CollectedOutcomes {
    succeeded: usize,
    failures: Vec<(usize, FailedItem)>,
}

impl OutcomeCollector {
    fn record(&self, index: usize, outcome: DownloadOutcome) {
        if let DownloadOutcome::Success { item } = &outcome {
            debug!("Saved {}", item.target_path);
        }

        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match outcome {
            DownloadOutcome::Success { .. } => state.succeeded += 1,
            DownloadOutcome::Failure { item, error } => {
                state.failures.push((index, FailedItem { item, error }))
            }
        }
    }

    fn finish(&self) -> BatchResult {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let mut failures = std::mem::take(&mut state.failures);
        failures.sort_by_key(|(index, _)| *index);

        BatchResult {
            success_count: state.succeeded,
            failures: failures.into_iter().map(|(_, failed)| failed).collect(),
        }
    }
}
