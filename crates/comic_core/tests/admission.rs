use std::collections::HashSet;

use comic_core::{
    Admission, Comic, FailureKind, FetchError, JobOutcome, ResultCollection, RunSummary,
};
use pretty_assertions::assert_eq;

fn comic(num: u64) -> Comic {
    Comic {
        num,
        title: format!("Comic {num}"),
        safe_title: format!("Comic {num}"),
        ..Comic::default()
    }
}

fn retrieved(num: u64) -> JobOutcome {
    JobOutcome::Retrieved {
        job_id: num,
        comic: comic(num),
    }
}

#[test]
fn accepts_valid_comics_in_arrival_order() {
    let mut collection = ResultCollection::new();
    for num in [3, 1, 2] {
        assert_eq!(collection.admit(retrieved(num)), Admission::Accepted { num });
    }

    let nums: Vec<u64> = collection.comics().iter().map(|c| c.num).collect();
    assert_eq!(nums, vec![3, 1, 2]);
}

#[test]
fn zero_num_payload_is_filtered_as_empty() {
    let mut collection = ResultCollection::new();
    let admission = collection.admit(JobOutcome::Retrieved {
        job_id: 9,
        comic: Comic::default(),
    });

    assert_eq!(admission, Admission::Empty { job_id: 9 });
    assert!(collection.is_empty());
}

#[test]
fn mismatched_num_is_not_admitted() {
    let mut collection = ResultCollection::new();
    collection.admit(retrieved(4));
    let admission = collection.admit(JobOutcome::Retrieved {
        job_id: 5,
        comic: comic(4),
    });

    assert_eq!(admission, Admission::Mismatched { job_id: 5, num: 4 });
    assert_eq!(collection.len(), 1);
}

#[test]
fn missing_and_failed_outcomes_are_counted_but_not_stored() {
    let mut collection = ResultCollection::new();
    collection.admit(retrieved(1));
    collection.admit(JobOutcome::Missing {
        job_id: 404,
        status: 404,
    });
    collection.admit(JobOutcome::Failed {
        job_id: 2,
        error: FetchError::new(FailureKind::Network, "connection reset"),
    });
    collection.admit(JobOutcome::Retrieved {
        job_id: 7,
        comic: Comic::default(),
    });

    assert_eq!(collection.len(), 1);
    assert_eq!(
        collection.summary(),
        RunSummary {
            outcomes: 4,
            retrieved: 1,
            empty: 1,
            mismatched: 0,
            missing: 1,
            failed: 1,
        }
    );
}

#[test]
fn admitted_ids_are_unique_and_in_range() {
    let n = 50u64;
    let mut collection = ResultCollection::new();
    for job_id in (1..=n).rev() {
        let outcome = match job_id % 5 {
            0 => JobOutcome::Missing {
                job_id,
                status: 500,
            },
            1 => JobOutcome::Retrieved {
                job_id,
                comic: comic(job_id % 7 + 1),
            },
            _ => retrieved(job_id),
        };
        collection.admit(outcome);
    }

    assert!(collection.len() as u64 <= n);
    let ids: HashSet<u64> = collection.comics().iter().map(|c| c.num).collect();
    assert_eq!(ids.len(), collection.len());
    assert!(collection
        .comics()
        .iter()
        .all(|c| c.is_valid() && (1..=n).contains(&c.num)));
}
