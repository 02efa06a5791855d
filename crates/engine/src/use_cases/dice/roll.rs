//! Roll dice use case - evaluates an expression and records it.

use std::sync::Arc;

use dmhelper_domain::{DiceExpression, RollSeed};

use super::DiceError;
use crate::infrastructure::ports::{ClockPort, SeedSource};
use crate::infrastructure::rng;
use crate::stores::{RollHistoryStore, RollRecord};

/// Evaluates dice expressions.
///
/// Each evaluation seeds its own generator, so concurrent calls never share
/// random state. Without an explicit seed a fresh one is derived from the
/// normalized text.
pub struct RollDice {
    store: Arc<RollHistoryStore>,
    seeds: Arc<dyn SeedSource>,
    clock: Arc<dyn ClockPort>,
}

impl RollDice {
    pub fn new(
        store: Arc<RollHistoryStore>,
        seeds: Arc<dyn SeedSource>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            store,
            seeds,
            clock,
        }
    }

    /// Evaluate `text` and append the outcome to the roll history.
    pub fn execute(&self, text: &str, seed: Option<RollSeed>) -> Result<RollRecord, DiceError> {
        let record = self.evaluate(text, seed)?;
        if let Some(evicted) = self.store.append(record.clone()) {
            tracing::trace!(seed = %evicted.seed(), "Evicted oldest roll from history");
        }
        Ok(record)
    }

    /// Evaluate `text` without touching the roll history.
    pub fn evaluate(&self, text: &str, seed: Option<RollSeed>) -> Result<RollRecord, DiceError> {
        let expression = DiceExpression::parse(text)?;
        let seed = seed.unwrap_or_else(|| self.seeds.derive(&expression.to_string()));
        let outcome = rng::evaluate(&expression, seed);

        tracing::debug!(
            expression = %outcome.expression,
            seed = %outcome.seed,
            total = outcome.total,
            "Evaluated dice expression"
        );

        Ok(RollRecord {
            outcome,
            rolled_at: self.clock.now(),
        })
    }
}
