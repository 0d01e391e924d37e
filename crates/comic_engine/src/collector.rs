use comic_core::{Admission, JobOutcome, ResultCollection, RunSummary};
use index_logging::{index_debug, index_info, index_warn};

use crate::queue::QueueReceiver;
use crate::signal::CompletionNotifier;

/// Everything the collector hands over when the result queue is exhausted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CollectorReport {
    pub collection: ResultCollection,
    pub summary: RunSummary,
}

/// Drain `results` into a fresh collection, then fire `notifier` once.
///
/// This task is the only writer of the collection. Spawn it before the worker
/// pool starts pushing.
pub async fn collect_results(
    results: QueueReceiver<JobOutcome>,
    notifier: CompletionNotifier<CollectorReport>,
) {
    let mut collection = ResultCollection::new();
    while let Some(outcome) = results.pop().await {
        match collection.admit(outcome) {
            Admission::Accepted { num } => index_info!("Retrieving issue #{}", num),
            Admission::Empty { job_id } => {
                index_debug!("Comic #{} returned an empty payload", job_id)
            }
            Admission::Mismatched { job_id, num } => {
                index_warn!("Comic #{} returned payload for #{}; discarded", job_id, num)
            }
            Admission::Missing { job_id, status } => {
                index_debug!("Comic #{} not available (status {})", job_id, status)
            }
            // Already reported by the worker.
            Admission::Failed { .. } => {}
        }
    }

    let summary = collection.summary();
    index_debug!(
        "Result queue drained: {} outcomes, {} comics collected",
        summary.outcomes,
        summary.retrieved
    );
    if !notifier.fire(CollectorReport {
        collection,
        summary,
    }) {
        index_warn!("Collector finished but nobody is waiting for the results");
    }
}
