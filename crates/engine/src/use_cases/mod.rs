//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.

pub mod dice;

// Re-export main types
pub use dice::{DiceError, DiceUseCases};
