#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use comic_core::{Comic, FailureKind, FetchError, JobId};
use comic_engine::ComicFetcher;

pub fn init_logging() {
    index_logging::initialize_for_tests();
}

pub fn comic(num: JobId) -> Comic {
    Comic {
        month: "4".into(),
        num,
        year: "2007".into(),
        safe_title: format!("Comic {num}"),
        alt: format!("alt text {num}"),
        img: format!("https://imgs.xkcd.com/comics/{num}.png"),
        title: format!("Comic {num}"),
        day: "1".into(),
        ..Comic::default()
    }
}

#[derive(Debug, Clone)]
pub enum Reply {
    Status(u16),
    Transport,
    Payload(Comic),
}

/// In-memory fetcher: every id succeeds unless overridden, with per-id latency.
pub struct ScriptedFetcher {
    overrides: HashMap<JobId, Reply>,
    latency: Box<dyn Fn(JobId) -> Duration + Send + Sync>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    calls: Mutex<Vec<JobId>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self {
            overrides: HashMap::new(),
            latency: Box::new(|_| Duration::ZERO),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn reply(mut self, id: JobId, reply: Reply) -> Self {
        self.overrides.insert(id, reply);
        self
    }

    pub fn latency(mut self, latency: impl Fn(JobId) -> Duration + Send + Sync + 'static) -> Self {
        self.latency = Box::new(latency);
        self
    }

    /// Deterministic pseudo-random latency in `0..max_ms` milliseconds.
    pub fn fuzzed_latency(self, seed: u64, max_ms: u64) -> Self {
        self.latency(move |id| {
            let mixed = (id ^ seed)
                .wrapping_mul(0x9E37_79B9_7F4A_7C15)
                .rotate_left(17);
            Duration::from_millis(mixed % max_ms.max(1))
        })
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<JobId> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ComicFetcher for ScriptedFetcher {
    async fn fetch(&self, id: JobId) -> Result<Comic, FetchError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.calls.lock().unwrap().push(id);

        let delay = (self.latency)(id);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        } else {
            tokio::task::yield_now().await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.overrides.get(&id) {
            None => Ok(comic(id)),
            Some(Reply::Payload(comic)) => Ok(comic.clone()),
            Some(Reply::Status(code)) => Err(FetchError::new(
                FailureKind::HttpStatus(*code),
                format!("{code}"),
            )),
            Some(Reply::Transport) => Err(FetchError::new(
                FailureKind::Network,
                "connection refused",
            )),
        }
    }
}

pub fn shared(fetcher: ScriptedFetcher) -> Arc<ScriptedFetcher> {
    Arc::new(fetcher)
}
