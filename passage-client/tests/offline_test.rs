use chrono::{TimeZone, Utc};

use passage_client::OfflineQueue;
use passage_core::models::{ProgressRecord, ProgressSyncPayload};

fn payload(n: u32) -> ProgressSyncPayload {
    let now = Utc.with_ymd_and_hms(2025, 11, 1, 0, 0, 0).unwrap();
    let mut record = ProgressRecord::new(now);
    record.total_time_spent_secs = n as u64;
    ProgressSyncPayload::from_record("u1", "c1", &record, now).unwrap()
}

#[test]
fn drains_in_fifo_order() {
    let now = Utc::now();
    let mut queue = OfflineQueue::new(8);
    assert!(queue.is_empty());

    for n in 0..3 {
        queue.enqueue(payload(n), now);
    }
    assert_eq!(queue.len(), 3);

    let drained = queue.drain();
    let times: Vec<u64> = drained
        .iter()
        .map(|q| q.payload.record.total_time_spent_secs)
        .collect();
    assert_eq!(times, vec![0, 1, 2]);
    assert!(queue.is_empty());
}

#[test]
fn overflow_drops_the_oldest_snapshot() {
    let now = Utc::now();
    let mut queue = OfflineQueue::new(2);
    queue.enqueue(payload(0), now);
    queue.enqueue(payload(1), now);
    queue.enqueue(payload(2), now);

    assert_eq!(queue.len(), 2);
    let times: Vec<u64> = queue
        .drain()
        .iter()
        .map(|q| q.payload.record.total_time_spent_secs)
        .collect();
    // Snapshot 0 was dropped; newer full snapshots supersede it.
    assert_eq!(times, vec![1, 2]);
}
