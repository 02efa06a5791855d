//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Clock (for testing timestamps and seed derivation)
//! - Seed derivation (for testing the fresh-roll path deterministically)

use chrono::{DateTime, Utc};
use dmhelper_domain::RollSeed;

#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Produces a seed for a roll that was requested without one.
#[cfg_attr(test, mockall::automock)]
pub trait SeedSource: Send + Sync {
    /// `normalized` is the canonical notation of the expression being rolled.
    fn derive(&self, normalized: &str) -> RollSeed;
}
