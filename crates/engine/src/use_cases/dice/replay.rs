//! Replay roll use case - reproduces a recorded roll from its seed.

use std::sync::Arc;

use dmhelper_domain::{DiceExpression, RollSeed};

use super::DiceError;
use crate::infrastructure::rng;
use crate::stores::{RollHistoryStore, RollRecord};

/// Re-executes the stored expression with the stored seed.
///
/// The replayed roll is not appended to the history again.
pub struct ReplayRoll {
    store: Arc<RollHistoryStore>,
}

impl ReplayRoll {
    pub fn new(store: Arc<RollHistoryStore>) -> Self {
        Self { store }
    }

    pub fn execute(&self, seed: RollSeed) -> Result<RollRecord, DiceError> {
        let record = self.store.get(seed).ok_or(DiceError::NotFound(seed))?;

        let expression = DiceExpression::parse(&record.outcome.expression)?;
        let outcome = rng::evaluate(&expression, seed);
        if outcome != record.outcome {
            tracing::warn!(
                seed = %seed,
                expression = %record.outcome.expression,
                "Replayed roll differs from recorded outcome"
            );
        }

        Ok(RollRecord {
            outcome,
            rolled_at: record.rolled_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_replay_reproduces_recorded_roll() {
        let store = Arc::new(RollHistoryStore::new(10));
        let expression = DiceExpression::parse("4d6dl1+2").unwrap();
        let original = RollRecord {
            outcome: rng::evaluate(&expression, RollSeed::new(42)),
            rolled_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        };
        store.append(original.clone());

        let replay = ReplayRoll::new(store.clone());
        let replayed = replay.execute(RollSeed::new(42)).unwrap();
        assert_eq!(replayed, original);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_unknown_seed_is_not_found() {
        let replay = ReplayRoll::new(Arc::new(RollHistoryStore::new(10)));
        assert_eq!(
            replay.execute(RollSeed::new(7)),
            Err(DiceError::NotFound(RollSeed::new(7)))
        );
    }

    #[test]
    fn test_evicted_seed_is_not_found() {
        let store = Arc::new(RollHistoryStore::new(1));
        let expression = DiceExpression::parse("1d20").unwrap();
        for seed in [1, 2] {
            store.append(RollRecord {
                outcome: rng::evaluate(&expression, RollSeed::new(seed)),
                rolled_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            });
        }
        let replay = ReplayRoll::new(store);
        assert!(matches!(
            replay.execute(RollSeed::new(1)),
            Err(DiceError::NotFound(_))
        ));
        assert!(replay.execute(RollSeed::new(2)).is_ok());
    }
}
