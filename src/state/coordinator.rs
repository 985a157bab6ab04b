use std::collections::hash_map::Entry;
use std::collections::HashMap;

use parking_lot::{Mutex, RwLock};

use super::stats::Statistics;
use super::{RequestId, StateError};

// ─── Public types ────────────────────────────────────────────────

/// Thread-safe request state.
/// Submission handlers call `record_submission()`, background tasks call
/// `store_digest()`, lookup and `/stats` read.
///
/// The latency log and the digest map are never mutated together, so each
/// sits behind its own lock.
pub struct Coordinator {
    latencies: Mutex<LatencyLog>,
    digests: RwLock<HashMap<RequestId, String>>,
}

// ─── Internal state ──────────────────────────────────────────────

/// Append-only latency samples plus their running sum.
/// Count and sum live under the same lock so a statistics read
/// always sees a whole prefix of the log.
struct LatencyLog {
    samples: Vec<u64>,
    sum_us: u64,
}

// ─── Coordinator impl ────────────────────────────────────────────

impl Coordinator {
    pub fn new() -> Self {
        Self {
            latencies: Mutex::new(LatencyLog {
                samples: Vec::with_capacity(1024),
                sum_us: 0,
            }),
            digests: RwLock::new(HashMap::new()),
        }
    }

    /// Append one latency sample and mint the identifier for it.
    /// The identifier is the new length of the log.
    pub fn record_submission(&self, latency_us: u64) -> RequestId {
        let mut log = self.latencies.lock();
        log.samples.push(latency_us);
        log.sum_us = log.sum_us.saturating_add(latency_us);
        log.samples.len() as RequestId
    }

    /// Store the digest for `id`. Storing the same value twice is a no-op;
    /// a different value for an already-populated id is rejected.
    pub fn store_digest(&self, id: RequestId, digest: String) -> Result<(), StateError> {
        match self.digests.write().entry(id) {
            Entry::Vacant(slot) => {
                slot.insert(digest);
                Ok(())
            }
            Entry::Occupied(existing) if *existing.get() == digest => Ok(()),
            Entry::Occupied(_) => Err(StateError::DigestConflict { id }),
        }
    }

    /// The digest for `id`, if its background task has finished.
    pub fn lookup_digest(&self, id: RequestId) -> Option<String> {
        self.digests.read().get(&id).cloned()
    }

    /// Count and integer mean of every recorded latency, from one snapshot.
    pub fn statistics(&self) -> Statistics {
        let log = self.latencies.lock();
        Statistics::from_totals(log.samples.len() as u64, log.sum_us)
    }

    /// Number of identifiers whose digest is available.
    pub fn completed(&self) -> usize {
        self.digests.read().len()
    }
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn identifiers_start_at_one_and_increase() {
        let coord = Coordinator::new();
        assert_eq!(coord.record_submission(10), 1);
        assert_eq!(coord.record_submission(20), 2);
        assert_eq!(coord.record_submission(30), 3);
    }

    #[test]
    fn concurrent_submissions_issue_every_id_exactly_once() {
        const THREADS: u64 = 8;
        const PER_THREAD: u64 = 250;

        let coord = Arc::new(Coordinator::new());
        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let coord = coord.clone();
                thread::spawn(move || {
                    (0..PER_THREAD)
                        .map(|i| coord.record_submission(t * 10 + i % 7))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for h in handles {
            for id in h.join().unwrap() {
                assert!(seen.insert(id), "id {id} issued twice");
            }
        }

        let n = THREADS * PER_THREAD;
        assert_eq!(seen, (1..=n).collect::<HashSet<_>>());
        assert_eq!(coord.statistics().total, n);
    }

    #[test]
    fn statistics_track_every_sample() {
        let coord = Coordinator::new();
        assert_eq!(coord.statistics(), Statistics { total: 0, average: 0 });

        coord.record_submission(3);
        coord.record_submission(4);
        assert_eq!(coord.statistics(), Statistics { total: 2, average: 3 });
    }

    #[test]
    fn total_never_lags_behind_issued_id() {
        let coord = Coordinator::new();
        for _ in 0..50 {
            let id = coord.record_submission(1);
            assert!(coord.statistics().total >= id);
        }
    }

    #[test]
    fn digest_is_absent_until_stored() {
        let coord = Coordinator::new();
        let id = coord.record_submission(5);
        assert_eq!(coord.lookup_digest(id), None);

        coord.store_digest(id, "abc".into()).unwrap();
        assert_eq!(coord.lookup_digest(id).as_deref(), Some("abc"));
        assert_eq!(coord.lookup_digest(id).as_deref(), Some("abc"));
        assert_eq!(coord.completed(), 1);
    }

    #[test]
    fn repeated_store_with_same_digest_is_idempotent() {
        let coord = Coordinator::new();
        coord.store_digest(1, "abc".into()).unwrap();
        assert_eq!(coord.store_digest(1, "abc".into()), Ok(()));
        assert_eq!(coord.lookup_digest(1).as_deref(), Some("abc"));
    }

    #[test]
    fn conflicting_store_is_rejected_and_keeps_first_value() {
        let coord = Coordinator::new();
        coord.store_digest(7, "first".into()).unwrap();

        let err = coord.store_digest(7, "second".into()).unwrap_err();
        assert_eq!(err, StateError::DigestConflict { id: 7 });
        assert_eq!(coord.lookup_digest(7).as_deref(), Some("first"));
    }

    #[test]
    fn unknown_id_is_not_found() {
        let coord = Coordinator::new();
        coord.record_submission(1);
        assert_eq!(coord.lookup_digest(0), None);
        assert_eq!(coord.lookup_digest(999), None);
    }

    #[test]
    fn concurrent_stores_and_lookups_lose_nothing() {
        let coord = Arc::new(Coordinator::new());
        let writers: Vec<_> = (1..=200u64)
            .map(|id| {
                let coord = coord.clone();
                thread::spawn(move || {
                    coord.store_digest(id, format!("d{id}")).unwrap();
                })
            })
            .collect();
        for w in writers {
            w.join().unwrap();
        }

        for id in 1..=200u64 {
            assert_eq!(coord.lookup_digest(id), Some(format!("d{id}")));
        }
        assert_eq!(coord.completed(), 200);
    }

    #[test]
    fn statistics_never_observe_a_torn_snapshot() {
        const WRITERS: usize = 4;
        const PER_WRITER: usize = 2_000;
        const SAMPLE_US: u64 = 7;

        let coord = Arc::new(Coordinator::new());
        let done = Arc::new(AtomicBool::new(false));

        let readers: Vec<_> = (0..2)
            .map(|_| {
                let coord = coord.clone();
                let done = done.clone();
                thread::spawn(move || {
                    let mut last_total = 0;
                    while !done.load(Ordering::Acquire) {
                        let stats = coord.statistics();
                        assert!(stats.total >= last_total, "total went backwards");
                        if stats.total > 0 {
                            assert_eq!(stats.average, SAMPLE_US);
                        }
                        last_total = stats.total;
                    }
                })
            })
            .collect();

        let writers: Vec<_> = (0..WRITERS)
            .map(|_| {
                let coord = coord.clone();
                thread::spawn(move || {
                    for _ in 0..PER_WRITER {
                        coord.record_submission(SAMPLE_US);
                    }
                })
            })
            .collect();

        for w in writers {
            w.join().unwrap();
        }
        done.store(true, Ordering::Release);
        for r in readers {
            r.join().unwrap();
        }

        let stats = coord.statistics();
        assert_eq!(stats.total, (WRITERS * PER_WRITER) as u64);
        assert_eq!(stats.average, SAMPLE_US);
    }
}
