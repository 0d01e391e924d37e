use tokio::sync::oneshot;

use crate::PipelineError;

/// One-shot completion signal carrying the finished stage's output.
///
/// Both halves are consumed on use: the notifier fires once and the waiter
/// receives once. Moving the value across establishes the happens-before
/// relation for every write the producing task made to it.
pub fn completion_signal<T>() -> (CompletionNotifier<T>, Completion<T>) {
    let (tx, rx) = oneshot::channel();
    (CompletionNotifier { tx }, Completion { rx })
}

#[derive(Debug)]
pub struct CompletionNotifier<T> {
    tx: oneshot::Sender<T>,
}

impl<T> CompletionNotifier<T> {
    /// Returns `false` if nobody is waiting anymore.
    pub fn fire(self, value: T) -> bool {
        self.tx.send(value).is_ok()
    }
}

#[derive(Debug)]
pub struct Completion<T> {
    rx: oneshot::Receiver<T>,
}

impl<T> Completion<T> {
    pub async fn wait(self) -> Result<T, PipelineError> {
        self.rx.await.map_err(|_| PipelineError::CollectorLost)
    }
}
