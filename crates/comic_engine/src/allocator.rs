use comic_core::Job;
use index_logging::{index_debug, index_error};

use crate::queue::{QueueError, QueueSender};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("job queue lost its consumers after {pushed} of {requested} jobs: {source}")]
pub struct AllocationError {
    pub pushed: u64,
    pub requested: u64,
    #[source]
    pub source: QueueError,
}

/// Push jobs `1..=count` in increasing order, then close the queue.
///
/// Suspends whenever the queue is full. Returns the number of jobs pushed,
/// which is always `count` on success.
pub async fn allocate_jobs(count: u64, queue: QueueSender<Job>) -> Result<u64, AllocationError> {
    let mut pushed = 0;
    for id in 1..=count {
        if let Err(source) = queue.push(Job::new(id)).await {
            index_error!("Job allocation stopped at id {}: {}", id, source);
            return Err(AllocationError {
                pushed,
                requested: count,
                source,
            });
        }
        pushed += 1;
    }
    queue.close();
    index_debug!("Allocated {} jobs; job queue closed", pushed);
    Ok(pushed)
}
