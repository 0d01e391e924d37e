use crate::{Comic, JobId, JobOutcome};

/// Decision taken for one outcome by [`ResultCollection::admit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Accepted { num: JobId },
    /// Retrieved payload with a zero `num`.
    Empty { job_id: JobId },
    /// Retrieved payload whose `num` differs from the requested id.
    Mismatched { job_id: JobId, num: JobId },
    Missing { job_id: JobId, status: u16 },
    Failed { job_id: JobId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub outcomes: usize,
    pub retrieved: usize,
    pub empty: usize,
    pub mismatched: usize,
    pub missing: usize,
    pub failed: usize,
}

impl RunSummary {
    fn record(&mut self, admission: Admission) {
        self.outcomes += 1;
        match admission {
            Admission::Accepted { .. } => self.retrieved += 1,
            Admission::Empty { .. } => self.empty += 1,
            Admission::Mismatched { .. } => self.mismatched += 1,
            Admission::Missing { .. } => self.missing += 1,
            Admission::Failed { .. } => self.failed += 1,
        }
    }
}

/// Valid comics in arrival order, plus per-run counters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultCollection {
    comics: Vec<Comic>,
    summary: RunSummary,
}

impl ResultCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the filtering policy to one outcome, appending it if it qualifies.
    pub fn admit(&mut self, outcome: JobOutcome) -> Admission {
        let admission = match outcome {
            JobOutcome::Retrieved { job_id, comic } => {
                if !comic.is_valid() {
                    Admission::Empty { job_id }
                } else if comic.num != job_id {
                    Admission::Mismatched {
                        job_id,
                        num: comic.num,
                    }
                } else {
                    let num = comic.num;
                    self.comics.push(comic);
                    Admission::Accepted { num }
                }
            }
            JobOutcome::Missing { job_id, status } => Admission::Missing { job_id, status },
            JobOutcome::Failed { job_id, .. } => Admission::Failed { job_id },
        };
        self.summary.record(admission);
        admission
    }

    pub fn comics(&self) -> &[Comic] {
        &self.comics
    }

    pub fn into_comics(self) -> Vec<Comic> {
        self.comics
    }

    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    pub fn len(&self) -> usize {
        self.comics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comics.is_empty()
    }
}
