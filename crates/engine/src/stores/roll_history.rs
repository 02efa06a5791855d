//! Roll history storage for runtime state.
//!
//! Bounded FIFO log of evaluated rolls. Once at capacity, each append evicts
//! the oldest record. Records are also indexed by seed for replay.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use dmhelper_domain::{RollOutcome, RollSeed};

/// One history entry: the outcome plus when it was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollRecord {
    pub outcome: RollOutcome,
    pub rolled_at: DateTime<Utc>,
}

impl RollRecord {
    pub fn seed(&self) -> RollSeed {
        self.outcome.seed
    }
}

/// Thread-safe bounded roll log.
pub struct RollHistoryStore {
    capacity: usize,
    inner: Mutex<Inner>,
}

struct Inner {
    records: VecDeque<RollRecord>,
    /// Sequence number of `records[0]`; sequence numbers are contiguous.
    front_seq: u64,
    /// Latest sequence number per seed.
    by_seed: HashMap<RollSeed, u64>,
}

impl Inner {
    fn position(&self, seq: u64) -> Option<usize> {
        let offset = usize::try_from(seq.checked_sub(self.front_seq)?).ok()?;
        (offset < self.records.len()).then_some(offset)
    }
}

impl RollHistoryStore {
    /// Create a store holding at most `capacity` records (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            inner: Mutex::new(Inner {
                records: VecDeque::with_capacity(capacity.min(4096)),
                front_seq: 0,
                by_seed: HashMap::new(),
            }),
        }
    }

    // The log only ever holds complete records, so a poisoned lock is safe to reuse.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a record, returning the evicted oldest record if at capacity.
    pub fn append(&self, record: RollRecord) -> Option<RollRecord> {
        let mut inner = self.lock();

        let evicted = if inner.records.len() >= self.capacity {
            let oldest = inner.records.pop_front();
            let oldest_seq = inner.front_seq;
            inner.front_seq += 1;
            if let Some(old) = &oldest {
                // Only unindex if no newer record reused the seed.
                if inner.by_seed.get(&old.seed()) == Some(&oldest_seq) {
                    inner.by_seed.remove(&old.seed());
                }
            }
            oldest
        } else {
            None
        };

        let seq = inner.front_seq + inner.records.len() as u64;
        inner.by_seed.insert(record.seed(), seq);
        inner.records.push_back(record);
        evicted
    }

    /// Most recent record for `seed`, if still retained.
    pub fn get(&self, seed: RollSeed) -> Option<RollRecord> {
        let inner = self.lock();
        let seq = *inner.by_seed.get(&seed)?;
        let index = inner.position(seq)?;
        inner.records.get(index).cloned()
    }

    /// Up to `limit` records, most recent first.
    pub fn recent(&self, limit: usize) -> Vec<RollRecord> {
        self.lock()
            .records
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect()
    }

    /// Every retained record, oldest first.
    pub fn snapshot(&self) -> Vec<RollRecord> {
        self.lock().records.iter().cloned().collect()
    }

    /// Empty the log unconditionally, returning how many records were removed.
    pub fn clear(&self) -> usize {
        let mut inner = self.lock();
        let removed = inner.records.len();
        inner.front_seq += removed as u64;
        inner.records.clear();
        inner.by_seed.clear();
        removed
    }
}
