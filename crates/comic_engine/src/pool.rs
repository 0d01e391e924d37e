use std::num::NonZeroUsize;
use std::sync::Arc;

use comic_core::{Job, JobOutcome};
use index_logging::{index_debug, index_error, index_warn};
use tokio::task::JoinSet;

use crate::fetch::ComicFetcher;
use crate::queue::{QueueReceiver, QueueSender};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolReport {
    pub workers: usize,
    pub workers_panicked: usize,
    pub jobs_processed: usize,
}

/// Fixed-width pool of fetch workers.
pub struct WorkerPool {
    width: NonZeroUsize,
    fetcher: Arc<dyn ComicFetcher>,
}

impl WorkerPool {
    pub fn new(width: NonZeroUsize, fetcher: Arc<dyn ComicFetcher>) -> Self {
        Self { width, fetcher }
    }

    pub fn width(&self) -> usize {
        self.width.get()
    }

    /// Drain `jobs` with `width` concurrent workers, pushing one outcome per job.
    ///
    /// `results` is closed exactly once, after every worker task has been
    /// joined. The result queue needs an active consumer while this runs,
    /// otherwise workers block on a full queue forever.
    pub async fn run(
        self,
        jobs: QueueReceiver<Job>,
        results: QueueSender<JobOutcome>,
    ) -> PoolReport {
        let mut workers = JoinSet::new();
        for worker_id in 0..self.width.get() {
            workers.spawn(run_worker(
                worker_id,
                Arc::clone(&self.fetcher),
                jobs.clone(),
                results.clone(),
            ));
        }
        drop(jobs);

        let mut report = PoolReport {
            workers: self.width.get(),
            ..PoolReport::default()
        };
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(processed) => report.jobs_processed += processed,
                Err(err) => {
                    index_error!("Worker task terminated abnormally: {}", err);
                    report.workers_panicked += 1;
                }
            }
        }

        // Every worker has terminated; this is the only remaining sender.
        results.close();
        index_debug!(
            "Worker pool finished: {} jobs processed by {} workers; result queue closed",
            report.jobs_processed,
            report.workers
        );
        report
    }
}

async fn run_worker(
    worker_id: usize,
    fetcher: Arc<dyn ComicFetcher>,
    jobs: QueueReceiver<Job>,
    results: QueueSender<JobOutcome>,
) -> usize {
    let mut processed = 0;
    while let Some(job) = jobs.pop().await {
        let result = fetcher.fetch(job.id).await;
        if let Err(err) = &result {
            index_warn!("error in fetching comic #{}: {}", job.id, err);
        }

        let outcome = JobOutcome::from_fetch(job.id, result);
        if let Err(err) = results.push(outcome).await {
            index_error!("Worker {} dropping comic #{}: {}", worker_id, job.id, err);
            break;
        }
        processed += 1;
    }
    index_debug!("Worker {} done after {} jobs", worker_id, processed);
    processed
}
