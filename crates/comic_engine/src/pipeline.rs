use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use comic_core::{render_index, RenderError, ResultCollection, RunSummary};
use index_logging::{index_debug, index_info};

use crate::allocator::{allocate_jobs, AllocationError};
use crate::collector::{collect_results, CollectorReport};
use crate::fetch::ComicFetcher;
use crate::persist::{IndexFileSink, PersistError};
use crate::pool::{PoolReport, WorkerPool};
use crate::queue::bounded_queue;
use crate::signal::completion_signal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Number of comic ids to request, starting at 1.
    pub job_count: u64,
    pub worker_count: usize,
    pub job_queue_capacity: usize,
    pub result_queue_capacity: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            job_count: 3000,
            worker_count: 100,
            job_queue_capacity: 100,
            result_queue_capacity: 100,
        }
    }
}

/// Validated sizes; every width and capacity is non-zero.
#[derive(Debug, Clone, Copy)]
struct PipelineSizes {
    job_count: u64,
    workers: NonZeroUsize,
    job_capacity: NonZeroUsize,
    result_capacity: NonZeroUsize,
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), PipelineError> {
        self.sizes().map(|_| ())
    }

    fn sizes(&self) -> Result<PipelineSizes, PipelineError> {
        if self.job_count == 0 {
            return Err(PipelineError::InvalidConfig("job_count must be positive"));
        }
        let non_zero = |value: usize, message| {
            NonZeroUsize::new(value).ok_or(PipelineError::InvalidConfig(message))
        };
        Ok(PipelineSizes {
            job_count: self.job_count,
            workers: non_zero(self.worker_count, "worker_count must be positive")?,
            job_capacity: non_zero(self.job_queue_capacity, "job_queue_capacity must be positive")?,
            result_capacity: non_zero(
                self.result_queue_capacity,
                "result_queue_capacity must be positive",
            )?,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("invalid pipeline configuration: {0}")]
    InvalidConfig(&'static str),
    #[error(transparent)]
    Allocation(#[from] AllocationError),
    #[error("collector stopped without signalling completion")]
    CollectorLost,
    #[error("pipeline task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("failed to render index: {0}")]
    Render(#[from] RenderError),
    #[error("failed to persist index: {0}")]
    Persist(#[from] PersistError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutput {
    pub collection: ResultCollection,
    pub summary: RunSummary,
    pub pool: PoolReport,
}

/// Allocator → job queue → worker pool → result queue → collector.
pub struct Pipeline {
    config: PipelineConfig,
    fetcher: Arc<dyn ComicFetcher>,
}

impl Pipeline {
    pub fn new(config: PipelineConfig, fetcher: Arc<dyn ComicFetcher>) -> Self {
        Self { config, fetcher }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every job to completion and return the collected comics.
    ///
    /// Must be called from within a multi-thread tokio runtime.
    pub async fn run(&self) -> Result<PipelineOutput, PipelineError> {
        let sizes = self.config.sizes()?;
        index_info!(
            "Fetching {} comics with {} workers",
            sizes.job_count,
            sizes.workers
        );

        let (job_tx, job_rx) = bounded_queue(sizes.job_capacity);
        let (result_tx, result_rx) = bounded_queue(sizes.result_capacity);
        let (notifier, completion) = completion_signal::<CollectorReport>();

        // The collector has to be draining before any worker can fill the result queue.
        let collector = tokio::spawn(collect_results(result_rx, notifier));
        let allocator = tokio::spawn(allocate_jobs(sizes.job_count, job_tx));

        let pool = WorkerPool::new(sizes.workers, Arc::clone(&self.fetcher))
            .run(job_rx, result_tx)
            .await;

        let report = completion.wait().await;
        collector.await?;
        allocator.await??;
        let CollectorReport {
            collection,
            summary,
        } = report?;

        index_info!(
            "Collected {} comics ({} missing, {} failed, {} empty, {} mismatched)",
            summary.retrieved,
            summary.missing,
            summary.failed,
            summary.empty,
            summary.mismatched
        );
        Ok(PipelineOutput {
            collection,
            summary,
            pool,
        })
    }

    /// Run, render and write the index to `output_path`, overwriting it.
    pub async fn write_index(
        &self,
        output_path: &Path,
    ) -> Result<(PipelineOutput, PathBuf), PipelineError> {
        let output = self.run().await?;
        let bytes = render_index(&output.collection)?;
        let written = IndexFileSink::new(output_path).write(&bytes)?;
        index_debug!("Wrote {} bytes to {:?}", bytes.len(), written);
        Ok((output, written))
    }
}
