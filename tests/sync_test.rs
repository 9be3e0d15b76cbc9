/*!
 * Synchronized Ring Tests
 * Blocking pulls, cancellation, and multi-threaded traffic
 */

use elastic_ring::{CancellationToken, RingConfig, RingError, SyncRing};
use pretty_assertions::assert_eq;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn sync_ring_3x2() -> SyncRing<i32> {
    SyncRing::new(
        RingConfig::new()
            .with_chunk_size(3)
            .with_chunk_count(2)
            .with_growth_strategy(|_| (3, 2)),
    )
}

#[test]
fn test_basic_push_pull() {
    let ring = sync_ring_3x2();
    let token = CancellationToken::new();

    ring.push(1);
    ring.push(2);
    ring.push(3);

    assert_eq!(ring.size(), 3);
    assert_eq!(ring.capacity(), 6);

    assert_eq!(ring.pull(&token), Ok(1));
    assert_eq!(ring.pull(&token), Ok(2));
    assert_eq!(ring.pull(&token), Ok(3));

    assert_eq!(ring.size(), 0);
    assert_eq!(ring.capacity(), 6);
}

#[test]
fn test_pull_blocks_until_push() {
    let ring = Arc::new(sync_ring_3x2());
    let token = CancellationToken::new();

    let consumer = {
        let ring = Arc::clone(&ring);
        thread::spawn(move || ring.pull(&token))
    };

    // Give the consumer time to park on the empty ring
    thread::sleep(Duration::from_millis(50));
    ring.push(42);

    assert_eq!(consumer.join().unwrap(), Ok(42));
    assert_eq!(ring.size(), 0);
}

#[test]
fn test_cancellation_interrupts_waiting_pull() {
    let ring = Arc::new(sync_ring_3x2());
    let token = CancellationToken::new();

    let consumer = {
        let ring = Arc::clone(&ring);
        let token = token.clone();
        thread::spawn(move || ring.pull(&token))
    };

    thread::sleep(Duration::from_millis(100));
    token.cancel();

    assert_eq!(consumer.join().unwrap(), Err(RingError::Cancelled));
}

#[test]
fn test_cancelled_token_still_pulls_buffered_data() {
    let ring = sync_ring_3x2();
    let token = CancellationToken::new();

    ring.push(7);
    token.cancel();

    // Cancellation is observed while waiting; data at check time wins
    assert_eq!(ring.pull(&token), Ok(7));
    assert_eq!(ring.pull(&token), Err(RingError::Cancelled));
}

#[test]
fn test_cancelled_wait_loses_no_elements() {
    let ring = Arc::new(sync_ring_3x2());
    let token = CancellationToken::new();

    let cancelled_consumer = {
        let ring = Arc::clone(&ring);
        let token = token.clone();
        thread::spawn(move || ring.pull(&token))
    };

    thread::sleep(Duration::from_millis(50));
    token.cancel();
    assert_eq!(cancelled_consumer.join().unwrap(), Err(RingError::Cancelled));

    // The element pushed afterwards is fully observable by another caller
    ring.push(11);
    assert_eq!(ring.size(), 1);
    assert_eq!(ring.pull(&CancellationToken::new()), Ok(11));
}

#[test]
fn test_cancelling_one_consumer_leaves_others_waiting() {
    let ring = Arc::new(sync_ring_3x2());
    let doomed = CancellationToken::new();
    let token = CancellationToken::new();

    let cancelled_consumer = {
        let ring = Arc::clone(&ring);
        let doomed = doomed.clone();
        thread::spawn(move || ring.pull(&doomed))
    };
    let surviving_consumer = {
        let ring = Arc::clone(&ring);
        let token = token.clone();
        thread::spawn(move || ring.pull(&token))
    };

    thread::sleep(Duration::from_millis(50));
    doomed.cancel();
    assert_eq!(cancelled_consumer.join().unwrap(), Err(RingError::Cancelled));

    // The survivor is still parked and picks up the next push
    ring.push(5);
    assert_eq!(surviving_consumer.join().unwrap(), Ok(5));
}

#[test]
fn test_concurrent_producers_consumers() {
    const PRODUCERS: usize = 5;
    const CONSUMERS: usize = 5;
    const PER_PRODUCER: usize = 100;

    let ring = Arc::new(SyncRing::new(
        RingConfig::new()
            .with_chunk_size(4)
            .with_chunk_count(2)
            .with_free_chunk_buffer(2)
            .with_growth_strategy(|_| (4, 2)),
    ));

    let producers: Vec<_> = (0..PRODUCERS)
        .map(|p| {
            let ring = Arc::clone(&ring);
            thread::spawn(move || {
                for i in 0..PER_PRODUCER {
                    ring.push(p * PER_PRODUCER + i);
                }
            })
        })
        .collect();

    let consumers: Vec<_> = (0..CONSUMERS)
        .map(|_| {
            let ring = Arc::clone(&ring);
            let token = CancellationToken::new();
            thread::spawn(move || {
                let mut got = Vec::with_capacity(PER_PRODUCER);
                for _ in 0..PER_PRODUCER {
                    got.push(ring.pull(&token).unwrap());
                }
                got
            })
        })
        .collect();

    for producer in producers {
        producer.join().unwrap();
    }

    let mut seen = HashSet::new();
    let mut total = 0;
    for consumer in consumers {
        for value in consumer.join().unwrap() {
            assert!(seen.insert(value), "value {} pulled twice", value);
            total += 1;
        }
    }

    // Every pushed value was pulled exactly once
    assert_eq!(total, PRODUCERS * PER_PRODUCER);
    assert_eq!(ring.size(), 0);
}

#[test]
fn test_fifo_order_single_producer_single_consumer() {
    const COUNT: usize = 500;

    let ring = Arc::new(SyncRing::new(
        RingConfig::new()
            .with_chunk_size(8)
            .with_chunk_count(2)
            .with_growth_strategy(|_| (8, 2)),
    ));

    let producer = {
        let ring = Arc::clone(&ring);
        thread::spawn(move || {
            for i in 0..COUNT {
                ring.push(i);
            }
        })
    };

    let token = CancellationToken::new();
    for expected in 0..COUNT {
        assert_eq!(ring.pull(&token), Ok(expected));
    }

    producer.join().unwrap();
}

#[test]
fn test_stats_under_lock() {
    let ring = sync_ring_3x2();
    ring.push(1);
    ring.push(2);
    ring.push(3);

    let stats = ring.stats();

    assert_eq!(stats.size, 3);
    assert_eq!(stats.capacity, 6);
    assert_eq!(stats.active_chunks, 2);
    assert_eq!(stats.active_chunk_sizes, vec![3, 3]);
    assert_eq!(stats.passive_chunks, 0);
}

#[test]
fn test_elements_drains_then_waits_until_cancelled() {
    let ring = Arc::new(sync_ring_3x2());
    let token = CancellationToken::new();

    for v in 1..=5 {
        ring.push(v);
    }

    let consumer = {
        let ring = Arc::clone(&ring);
        let token = token.clone();
        thread::spawn(move || ring.elements(&token).collect::<Vec<_>>())
    };

    // The iterator drains the buffer, then parks on the empty ring
    thread::sleep(Duration::from_millis(100));
    token.cancel();

    assert_eq!(consumer.join().unwrap(), vec![1, 2, 3, 4, 5]);
    assert_eq!(ring.size(), 0);
}

#[test]
fn test_elements_stopped_mid_iteration() {
    let ring = sync_ring_3x2();
    let token = CancellationToken::new();

    for v in 1..=5 {
        ring.push(v);
    }

    let first_two: Vec<i32> = ring.elements(&token).take(2).collect();

    assert_eq!(first_two, vec![1, 2]);
    // Untaken elements stay buffered for the next caller
    assert_eq!(ring.size(), 3);
}

#[test]
fn test_elements_restartable_per_call() {
    let ring = sync_ring_3x2();
    let token = CancellationToken::new();

    ring.push(1);
    ring.push(2);
    let first: Vec<i32> = ring.elements(&token).take(1).collect();

    ring.push(3);
    let rest: Vec<i32> = ring.elements(&token).take(2).collect();

    assert_eq!(first, vec![1]);
    assert_eq!(rest, vec![2, 3]);
}
