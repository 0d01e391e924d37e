//! Bounded multi-producer, multi-consumer FIFO.
//!
//! `push` suspends while the buffer is full and `pop` suspends while it is
//! empty; that suspension is the pipeline's backpressure. Closing consumes the
//! sender handle, so a handle can be closed at most once and cannot push after
//! closing. Consumers observe the close once every sender clone is gone and
//! the buffer is drained.

use std::num::NonZeroUsize;
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    #[error("queue has no remaining consumers")]
    Disconnected,
}

pub fn bounded_queue<T>(capacity: NonZeroUsize) -> (QueueSender<T>, QueueReceiver<T>) {
    let (tx, rx) = mpsc::channel(capacity.get());
    (
        QueueSender { tx },
        QueueReceiver {
            rx: Arc::new(Mutex::new(rx)),
        },
    )
}

#[derive(Debug)]
pub struct QueueSender<T> {
    tx: mpsc::Sender<T>,
}

// Manual impl: a derived Clone would require `T: Clone`.
impl<T> Clone for QueueSender<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T> QueueSender<T> {
    pub async fn push(&self, item: T) -> Result<(), QueueError> {
        self.tx.send(item).await.map_err(|_| QueueError::Disconnected)
    }

    /// Close this handle. The queue closes for consumers when the last handle closes.
    pub fn close(self) {
        drop(self.tx);
    }

    pub fn capacity(&self) -> usize {
        self.tx.max_capacity()
    }

    /// Free slots right now; racy by nature, intended for diagnostics and tests.
    pub fn available(&self) -> usize {
        self.tx.capacity()
    }

    pub fn is_disconnected(&self) -> bool {
        self.tx.is_closed()
    }
}

#[derive(Debug)]
pub struct QueueReceiver<T> {
    rx: Arc<Mutex<mpsc::Receiver<T>>>,
}

impl<T> Clone for QueueReceiver<T> {
    fn clone(&self) -> Self {
        Self {
            rx: Arc::clone(&self.rx),
        }
    }
}

impl<T> QueueReceiver<T> {
    /// Next item in FIFO order, or `None` once the queue is closed and drained.
    pub async fn pop(&self) -> Option<T> {
        self.rx.lock().await.recv().await
    }
}
