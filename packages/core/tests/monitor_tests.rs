use std::sync::Arc;
use std::time::{Duration, Instant};

use shop_core::{Monitor, MonitorClosed, Order, OrderId, Priority};

fn order(id: u64, priority: Priority) -> Order {
    Order::new(OrderId(id), priority)
}

#[tokio::test]
async fn push_blocks_at_capacity_until_a_pop_frees_a_slot() {
    let monitor = Arc::new(Monitor::new(2));
    monitor.push(order(1, Priority::Standard)).await.unwrap();
    monitor.push(order(2, Priority::Standard)).await.unwrap();
    assert_eq!(monitor.len(), 2);

    let producer = {
        let monitor = monitor.clone();
        tokio::spawn(async move { monitor.push(order(3, Priority::Standard)).await })
    };

    // The third push must stay suspended while the queue is full.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(!producer.is_finished());
    assert_eq!(monitor.len(), 2);

    monitor.pop().await.unwrap();
    producer.await.unwrap().unwrap();
    assert_eq!(monitor.len(), 2);
}

#[tokio::test]
async fn pop_extracts_maximum_priority_with_stable_ties() {
    let monitor = Monitor::new(8);
    monitor.push(order(1, Priority::Standard)).await.unwrap();
    monitor.push(order(2, Priority::Premium)).await.unwrap();
    monitor.push(order(3, Priority::Standard)).await.unwrap();
    monitor
        .push(order(4, Priority::ReturnedPremium))
        .await
        .unwrap();

    assert_eq!(monitor.pop().await.unwrap().id, OrderId(4));
    assert_eq!(monitor.pop().await.unwrap().id, OrderId(2));
    // Equal-priority orders come out in insertion order.
    assert_eq!(monitor.pop().await.unwrap().id, OrderId(1));
    assert_eq!(monitor.pop().await.unwrap().id, OrderId(3));
}

#[tokio::test]
async fn concurrent_pushes_lose_no_items() {
    let monitor = Arc::new(Monitor::new(10));

    let producers: Vec<_> = (0..100u64)
        .map(|id| {
            let monitor = monitor.clone();
            tokio::spawn(async move { monitor.push(order(id, Priority::Standard)).await })
        })
        .collect();

    let mut seen = Vec::new();
    for _ in 0..100 {
        seen.push(monitor.pop().await.unwrap().id.0);
    }
    for producer in producers {
        producer.await.unwrap().unwrap();
    }

    seen.sort_unstable();
    assert_eq!(seen, (0..100).collect::<Vec<_>>());
    assert_eq!(monitor.len(), 0);
}

#[tokio::test]
async fn pop_on_empty_queue_waits_for_a_push() {
    let monitor = Arc::new(Monitor::new(1));
    let delay = Duration::from_millis(100);

    let producer = {
        let monitor = monitor.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            monitor.push(order(7, Priority::Premium)).await
        })
    };

    let start = Instant::now();
    let popped = monitor.pop().await.unwrap();
    assert!(start.elapsed() >= delay);
    assert_eq!(popped.id, OrderId(7));
    producer.await.unwrap().unwrap();
}

#[tokio::test]
async fn peek_observes_the_maximum_without_removing_it() {
    let monitor = Monitor::new(4);
    monitor.push(order(1, Priority::Standard)).await.unwrap();
    monitor
        .push(order(2, Priority::ReturnedStandard))
        .await
        .unwrap();

    assert_eq!(monitor.peek().await.unwrap().id, OrderId(2));
    assert_eq!(monitor.len(), 2);
    // Peeking reserves no capacity: the queue can still be filled.
    monitor.push(order(3, Priority::Standard)).await.unwrap();
    monitor.push(order(4, Priority::Standard)).await.unwrap();
    assert_eq!(monitor.len(), 4);
}

#[tokio::test]
async fn snapshot_is_a_point_in_time_copy() {
    let monitor = Monitor::new(4);
    monitor.push(order(1, Priority::Standard)).await.unwrap();
    monitor.push(order(2, Priority::Premium)).await.unwrap();

    let snapshot = monitor.snapshot();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[0].id, OrderId(1));
    assert_eq!(snapshot[1].id, OrderId(2));
    assert_eq!(monitor.len(), 2);
}

#[tokio::test]
async fn close_unblocks_suspended_waiters() {
    let monitor = Arc::new(Monitor::new(1));

    let blocked_pop = {
        let monitor = monitor.clone();
        tokio::spawn(async move { monitor.pop().await })
    };
    monitor.push(order(1, Priority::Standard)).await.unwrap();
    // Drain so the next producer genuinely suspends on a full queue.
    let _ = blocked_pop.await.unwrap();

    monitor.push(order(2, Priority::Standard)).await.unwrap();
    let blocked_push = {
        let monitor = monitor.clone();
        tokio::spawn(async move { monitor.push(order(3, Priority::Standard)).await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(!blocked_push.is_finished());

    monitor.close();
    assert_eq!(blocked_push.await.unwrap(), Err(MonitorClosed));
    assert_eq!(monitor.pop().await, Err(MonitorClosed));
    assert!(monitor.is_closed());
}
