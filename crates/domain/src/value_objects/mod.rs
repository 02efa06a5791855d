//! Value objects - Immutable objects defined by their attributes

mod dice;
mod dice_notation;
mod roll_outcome;
mod seed;

pub use dice::{
    DiceExpression, DiceGroup, DieType, Mechanic, Sign, MAX_DICE_PER_GROUP,
    MAX_GROUPS_PER_EXPRESSION, MAX_MODIFIER,
};
pub use roll_outcome::{DieRoll, GroupOutcome, RollOutcome};
pub use seed::RollSeed;
