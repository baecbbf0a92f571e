use tracing::{error, info, warn};

use crate::domain::BatchResult;

pub fn summary_line(result: &BatchResult) -> String {
    format!(
        "{} failure, {} succeed",
        result.failure_count(),
        result.success_count
    )
}

/// Log the batch tally, then one line per failed item with its source URL.
pub fn log_report(result: &BatchResult) {
    let summary = summary_line(result);
    if result.failures.is_empty() {
        info!("{}", summary);
    } else {
        warn!("{}", summary);
    }

    for failed in &result.failures {
        error!("{}\n{}", failed.error, failed.item.source_url);
    }
}
