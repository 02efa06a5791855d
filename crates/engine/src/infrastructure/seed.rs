//! Seed derivation for rolls requested without an explicit seed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dmhelper_domain::RollSeed;
use sha2::{Digest, Sha256};

use crate::infrastructure::ports::{ClockPort, SeedSource};

/// Disambiguates derivations that share text and timestamp.
static DERIVATION_COUNTER: AtomicU64 = AtomicU64::new(0);

/// SHA-256 over (normalized text, clock nanos, process id, counter).
pub struct Sha256SeedSource {
    clock: Arc<dyn ClockPort>,
}

impl Sha256SeedSource {
    pub fn new(clock: Arc<dyn ClockPort>) -> Self {
        Self { clock }
    }
}

impl SeedSource for Sha256SeedSource {
    fn derive(&self, normalized: &str) -> RollSeed {
        let now = self.clock.now();
        let nanos = now
            .timestamp_nanos_opt()
            .unwrap_or_else(|| now.timestamp_micros().saturating_mul(1_000));
        let counter = DERIVATION_COUNTER.fetch_add(1, Ordering::Relaxed);

        let mut hasher = Sha256::new();
        hasher.update(normalized.as_bytes());
        hasher.update([0u8]);
        hasher.update(nanos.to_be_bytes());
        hasher.update(std::process::id().to_be_bytes());
        hasher.update(counter.to_be_bytes());
        let digest = hasher.finalize();

        let mut first = [0u8; 8];
        first.copy_from_slice(&digest[..8]);
        RollSeed::new(u64::from_be_bytes(first))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use chrono::{TimeZone, Utc};

    fn frozen() -> Sha256SeedSource {
        let instant = Utc.with_ymd_and_hms(2025, 6, 15, 10, 30, 0).unwrap();
        Sha256SeedSource::new(Arc::new(FixedClock(instant)))
    }

    #[test]
    fn test_same_instant_same_text_gives_distinct_seeds() {
        let source = frozen();
        let a = source.derive("1d20");
        let b = source.derive("1d20");
        assert_ne!(a, b);
    }

    #[test]
    fn test_many_derivations_are_unique() {
        let source = frozen();
        let seeds: std::collections::HashSet<RollSeed> =
            (0..500).map(|_| source.derive("2d6+3")).collect();
        assert_eq!(seeds.len(), 500);
    }
}
