//! Dice vocabulary for the DM Helper campaign assistant.
//!
//! Parsing and execution are pure: no I/O, no clock, no random source of
//! their own. The engine crate supplies seeds and draws.

pub mod error;
pub mod value_objects;

pub use error::{DiceErrorKind, DiceParseError, SeedParseError};
pub use value_objects::{
    DiceExpression, DiceGroup, DieRoll, DieType, GroupOutcome, Mechanic, RollOutcome, RollSeed,
    Sign, MAX_DICE_PER_GROUP, MAX_GROUPS_PER_EXPRESSION, MAX_MODIFIER,
};
