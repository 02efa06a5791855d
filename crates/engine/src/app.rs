//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    clock::SystemClock,
    config::EngineConfig,
    ports::{ClockPort, SeedSource},
    seed::Sha256SeedSource,
};
use crate::stores::RollHistoryStore;
use crate::use_cases;

/// Main application state.
///
/// Holds configuration and use cases.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub config: EngineConfig,
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub dice: use_cases::DiceUseCases,
}

impl App {
    /// Create a new App with the system clock and hashed seed derivation.
    pub fn new(config: EngineConfig) -> Self {
        let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());
        let seeds: Arc<dyn SeedSource> = Arc::new(Sha256SeedSource::new(clock.clone()));
        Self::with_ports(config, clock, seeds)
    }

    /// Create a new App with explicit infrastructure ports.
    pub fn with_ports(
        config: EngineConfig,
        clock: Arc<dyn ClockPort>,
        seeds: Arc<dyn SeedSource>,
    ) -> Self {
        let store = Arc::new(RollHistoryStore::new(config.history.capacity));
        let dice = use_cases::DiceUseCases::new(
            store,
            seeds,
            clock,
            config.history.default_limit,
            config.history.max_limit,
        );

        Self {
            config,
            use_cases: UseCases { dice },
        }
    }
}
