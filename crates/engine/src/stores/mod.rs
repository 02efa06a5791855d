//! In-memory state storage modules.
//!
//! Stores manage runtime state that doesn't belong in a database:
//! - `RollHistoryStore` - Bounded FIFO log of evaluated rolls, indexed by seed

pub mod roll_history;

// Re-export store types
pub use roll_history::{RollHistoryStore, RollRecord};
