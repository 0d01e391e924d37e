use serde::{Deserialize, Serialize};

pub type JobId = u64;

/// One unit of work: fetch the comic with this number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Job {
    pub id: JobId,
}

impl Job {
    pub fn new(id: JobId) -> Self {
        Self { id }
    }
}

/// Comic metadata as served by `/{num}/info.0.json` and as written to the index.
///
/// Field order here is the field order of the output document. Fields absent
/// from a response decode to their empty value; unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Comic {
    pub month: String,
    pub num: JobId,
    pub link: String,
    pub year: String,
    pub news: String,
    pub safe_title: String,
    pub transcript: String,
    pub alt: String,
    pub img: String,
    pub title: String,
    pub day: String,
}

impl Comic {
    /// A zero `num` marks a payload that carries no comic.
    pub fn is_valid(&self) -> bool {
        self.num != 0
    }
}
