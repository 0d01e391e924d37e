use std::num::NonZeroUsize;
use std::time::Duration;

use comic_engine::{bounded_queue, QueueError};
use tokio::time::timeout;

fn capacity(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

#[tokio::test]
async fn push_suspends_when_full_until_an_item_is_popped() {
    let (tx, rx) = bounded_queue::<u32>(capacity(2));
    tx.push(1).await.unwrap();
    tx.push(2).await.unwrap();
    assert_eq!(tx.available(), 0);

    let blocked = timeout(Duration::from_millis(50), tx.push(3)).await;
    assert!(blocked.is_err(), "push into a full queue must suspend");

    assert_eq!(rx.pop().await, Some(1));
    timeout(Duration::from_millis(500), tx.push(3))
        .await
        .expect("push resumes after a pop")
        .unwrap();
}

#[tokio::test]
async fn pop_suspends_when_empty() {
    let (tx, rx) = bounded_queue::<u32>(capacity(1));
    let waiting = timeout(Duration::from_millis(50), rx.pop()).await;
    assert!(waiting.is_err(), "pop on an empty open queue must suspend");
    drop(tx);
}

#[tokio::test]
async fn close_drains_remaining_items_then_ends() {
    let (tx, rx) = bounded_queue(capacity(4));
    for i in 0..3 {
        tx.push(i).await.unwrap();
    }
    tx.close();

    assert_eq!(rx.pop().await, Some(0));
    assert_eq!(rx.pop().await, Some(1));
    assert_eq!(rx.pop().await, Some(2));
    assert_eq!(rx.pop().await, None);
    assert_eq!(rx.pop().await, None);
}

#[tokio::test]
async fn queue_stays_open_until_every_sender_closes() {
    let (tx, rx) = bounded_queue(capacity(4));
    let second = tx.clone();
    tx.close();

    let still_open = timeout(Duration::from_millis(50), rx.pop()).await;
    assert!(still_open.is_err());

    second.push(7).await.unwrap();
    second.close();
    assert_eq!(rx.pop().await, Some(7));
    assert_eq!(rx.pop().await, None);
}

#[tokio::test]
async fn push_fails_once_all_receivers_are_gone() {
    let (tx, rx) = bounded_queue(capacity(1));
    let other = rx.clone();
    drop(rx);
    assert!(!tx.is_disconnected());
    drop(other);

    assert!(tx.is_disconnected());
    assert_eq!(tx.push(1).await, Err(QueueError::Disconnected));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn multiple_consumers_receive_each_item_once() {
    let (tx, rx) = bounded_queue(capacity(3));
    let mut consumers = Vec::new();
    for _ in 0..4 {
        let rx = rx.clone();
        consumers.push(tokio::spawn(async move {
            let mut seen = Vec::new();
            while let Some(item) = rx.pop().await {
                seen.push(item);
            }
            seen
        }));
    }
    drop(rx);

    for i in 0..200u32 {
        tx.push(i).await.unwrap();
    }
    tx.close();

    let mut all = Vec::new();
    for consumer in consumers {
        all.extend(consumer.await.unwrap());
    }
    all.sort_unstable();
    assert_eq!(all, (0..200).collect::<Vec<_>>());
}
