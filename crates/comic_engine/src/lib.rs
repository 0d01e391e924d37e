//! Comic engine: bounded fetch pipeline and index persistence.
mod allocator;
mod collector;
mod fetch;
mod persist;
mod pipeline;
mod pool;
mod queue;
mod signal;

pub use allocator::{allocate_jobs, AllocationError};
pub use collector::{collect_results, CollectorReport};
pub use fetch::{ComicFetcher, FetchSettings, ReqwestComicFetcher, DEFAULT_BASE_URL};
pub use persist::{ensure_parent_dir, IndexFileSink, PersistError};
pub use pipeline::{Pipeline, PipelineConfig, PipelineError, PipelineOutput};
pub use pool::{PoolReport, WorkerPool};
pub use queue::{bounded_queue, QueueError, QueueReceiver, QueueSender};
pub use signal::{completion_signal, Completion, CompletionNotifier};
