//! Dice use cases.
//!
//! Evaluation, validation, history, replay and free-text detection for dice
//! expressions. Parsing and execution live in the domain crate; these use
//! cases add seeds, random draws, timestamps and the shared roll log.

use std::sync::Arc;

use dmhelper_domain::{DiceErrorKind, DiceParseError, RollSeed};

use crate::infrastructure::ports::{ClockPort, SeedSource};
use crate::stores::RollHistoryStore;

mod detect;
mod health;
mod history;
mod replay;
mod roll;
mod suggest;
mod validate;

pub use detect::{DetectDice, Detection, DetectionKind};
pub use health::{DiceHealth, DiceHealthCheck};
pub use history::{RollHistory, RollStatistics};
pub use replay::ReplayRoll;
pub use roll::RollDice;
pub use suggest::SuggestExpressions;
pub use validate::{ValidateExpression, ValidationReport};

/// Container for dice use cases.
pub struct DiceUseCases {
    pub roll: Arc<RollDice>,
    pub validate: Arc<ValidateExpression>,
    pub history: Arc<RollHistory>,
    pub replay: Arc<ReplayRoll>,
    pub detect: Arc<DetectDice>,
    pub suggest: Arc<SuggestExpressions>,
    pub health: Arc<DiceHealthCheck>,
}

impl DiceUseCases {
    /// Wire every dice use case around one shared roll log.
    pub fn new(
        store: Arc<RollHistoryStore>,
        seeds: Arc<dyn SeedSource>,
        clock: Arc<dyn ClockPort>,
        history_default_limit: usize,
        history_max_limit: usize,
    ) -> Self {
        let roll = Arc::new(RollDice::new(store.clone(), seeds, clock));
        Self {
            validate: Arc::new(ValidateExpression::new()),
            history: Arc::new(RollHistory::new(
                store.clone(),
                history_default_limit,
                history_max_limit,
            )),
            replay: Arc::new(ReplayRoll::new(store.clone())),
            detect: Arc::new(DetectDice::new()),
            suggest: Arc::new(SuggestExpressions::new()),
            health: Arc::new(DiceHealthCheck::new(roll.clone(), store)),
            roll,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiceError {
    #[error(transparent)]
    Parse(#[from] DiceParseError),
    #[error("No roll with seed {0} in history")]
    NotFound(RollSeed),
}

impl DiceError {
    pub fn kind(&self) -> DiceErrorKind {
        match self {
            Self::Parse(e) => e.kind(),
            Self::NotFound(_) => DiceErrorKind::NotFound,
        }
    }
}
