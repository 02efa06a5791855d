//! Dice self-check use case.

use std::sync::Arc;

use dmhelper_domain::DieType;

use super::{DiceError, RollDice};
use crate::stores::RollHistoryStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiceHealth {
    pub sample_total: i64,
    pub history_size: usize,
    pub history_capacity: usize,
    pub supported_dice: Vec<DieType>,
}

/// Evaluates a throwaway `1d20` (never recorded) and reports the log state.
pub struct DiceHealthCheck {
    roll: Arc<RollDice>,
    store: Arc<RollHistoryStore>,
}

impl DiceHealthCheck {
    pub fn new(roll: Arc<RollDice>, store: Arc<RollHistoryStore>) -> Self {
        Self { roll, store }
    }

    pub fn execute(&self) -> Result<DiceHealth, DiceError> {
        let sample = self.roll.evaluate("1d20", None)?;
        Ok(DiceHealth {
            sample_total: sample.outcome.total,
            history_size: self.store.len(),
            history_capacity: self.store.capacity(),
            supported_dice: DieType::ALL.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::SystemClock;
    use crate::infrastructure::ports::MockSeedSource;
    use dmhelper_domain::RollSeed;

    #[test]
    fn test_health_does_not_record() {
        let store = Arc::new(RollHistoryStore::new(4));
        let mut seeds = MockSeedSource::new();
        seeds.expect_derive().returning(|_| RollSeed::new(3));
        let roll = Arc::new(RollDice::new(
            store.clone(),
            Arc::new(seeds),
            Arc::new(SystemClock::new()),
        ));

        let health = DiceHealthCheck::new(roll, store.clone()).execute().unwrap();
        assert!((1..=20).contains(&health.sample_total));
        assert_eq!(health.history_size, 0);
        assert_eq!(health.history_capacity, 4);
        assert_eq!(health.supported_dice.len(), 7);
        assert!(store.is_empty());
    }
}
