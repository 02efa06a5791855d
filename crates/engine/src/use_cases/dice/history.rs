//! Roll history use cases - listing, clearing and aggregate statistics.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::stores::{RollHistoryStore, RollRecord};

/// Aggregates over the retained history.
#[derive(Debug, Clone, PartialEq)]
pub struct RollStatistics {
    pub total_rolls: usize,
    pub average_total: Option<f64>,
    pub most_common_expression: Option<String>,
    pub critical_hits: usize,
    pub critical_failures: usize,
    pub expression_counts: BTreeMap<String, usize>,
}

/// History operations.
pub struct RollHistory {
    store: Arc<RollHistoryStore>,
    default_limit: usize,
    max_limit: usize,
}

impl RollHistory {
    pub fn new(store: Arc<RollHistoryStore>, default_limit: usize, max_limit: usize) -> Self {
        Self {
            store,
            default_limit,
            max_limit,
        }
    }

    /// Most recent first. The limit falls back to the configured default and
    /// is clamped to the configured maximum.
    pub fn list(&self, limit: Option<usize>) -> Vec<RollRecord> {
        let limit = limit.unwrap_or(self.default_limit).min(self.max_limit);
        self.store.recent(limit)
    }

    pub fn clear(&self) -> usize {
        let cleared = self.store.clear();
        tracing::info!(cleared, "Cleared roll history");
        cleared
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    pub fn statistics(&self) -> RollStatistics {
        let records = self.store.snapshot();

        let mut expression_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut sum: i128 = 0;
        let mut critical_hits = 0;
        let mut critical_failures = 0;
        for record in &records {
            let outcome = &record.outcome;
            *expression_counts
                .entry(outcome.expression.clone())
                .or_default() += 1;
            sum += i128::from(outcome.total);
            critical_hits += usize::from(outcome.is_critical_max);
            critical_failures += usize::from(outcome.is_critical_min);
        }

        // Ties go to the alphabetically first expression.
        let most_common_expression = expression_counts
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(expression, _)| expression.clone());

        let average_total = (!records.is_empty()).then(|| sum as f64 / records.len() as f64);

        RollStatistics {
            total_rolls: records.len(),
            average_total,
            most_common_expression,
            critical_hits,
            critical_failures,
            expression_counts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use dmhelper_domain::{DiceExpression, RollSeed};

    fn push(store: &RollHistoryStore, notation: &str, seed: u64, value: u32) {
        let outcome = DiceExpression::parse(notation)
            .unwrap()
            .roll_with(RollSeed::new(seed), |_| value);
        store.append(RollRecord {
            outcome,
            rolled_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        });
    }

    #[test]
    fn test_list_limits() {
        let store = Arc::new(RollHistoryStore::new(100));
        for seed in 0..30 {
            push(&store, "1d6", seed, 3);
        }
        let history = RollHistory::new(store, 10, 20);
        assert_eq!(history.list(None).len(), 10);
        assert_eq!(history.list(Some(5)).len(), 5);
        assert_eq!(history.list(Some(500)).len(), 20);
        assert_eq!(history.list(Some(1))[0].seed(), RollSeed::new(29));
    }

    #[test]
    fn test_statistics() {
        let store = Arc::new(RollHistoryStore::new(100));
        push(&store, "1d20", 1, 20);
        push(&store, "1d20", 2, 1);
        push(&store, "1d20+5", 3, 20);
        push(&store, "2d6", 4, 3);
        let history = RollHistory::new(store, 50, 1000);

        let stats = history.statistics();
        assert_eq!(stats.total_rolls, 4);
        assert_eq!(stats.critical_hits, 2);
        assert_eq!(stats.critical_failures, 1);
        assert_eq!(stats.most_common_expression.as_deref(), Some("1d20"));
        assert_eq!(stats.expression_counts["1d20"], 2);
        assert_eq!(stats.expression_counts["2d6"], 1);
        // 20 + 1 + 25 + 6
        assert_eq!(stats.average_total, Some(13.0));
    }

    #[test]
    fn test_statistics_average_of_extreme_totals() {
        let store = Arc::new(RollHistoryStore::new(10));
        for seed in 0..4 {
            push(&store, "1d20+1000000", seed, 20);
        }
        let history = RollHistory::new(store, 50, 1000);
        assert_eq!(history.statistics().average_total, Some(1_000_020.0));
    }

    #[test]
    fn test_statistics_empty() {
        let history = RollHistory::new(Arc::new(RollHistoryStore::new(5)), 50, 1000);
        let stats = history.statistics();
        assert_eq!(stats.total_rolls, 0);
        assert_eq!(stats.average_total, None);
        assert_eq!(stats.most_common_expression, None);
        assert!(stats.expression_counts.is_empty());
    }

    #[test]
    fn test_clear() {
        let store = Arc::new(RollHistoryStore::new(5));
        push(&store, "1d4", 1, 2);
        let history = RollHistory::new(store, 50, 1000);
        assert_eq!(history.clear(), 1);
        assert!(history.is_empty());
        assert_eq!(history.clear(), 0);
    }
}
