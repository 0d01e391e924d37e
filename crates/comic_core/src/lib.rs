//! Comic core: pure data model, admission policy and index rendering.
mod collection;
mod comic;
mod outcome;
mod render;

pub use collection::{Admission, ResultCollection, RunSummary};
pub use comic::{Comic, Job, JobId};
pub use outcome::{FailureKind, FetchError, JobOutcome};
pub use render::{render_index, RenderError};
