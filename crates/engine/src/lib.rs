//! DM Helper Engine library.
//!
//! This crate contains all server-side code for the dice service.
//!
//! ## Structure
//!
//! - `use_cases/` - Roll, validate, history, replay, detection and suggestions
//! - `stores/` - In-memory roll history
//! - `infrastructure/` - Configuration, clock, seed derivation, seeded RNG (ports + adapters)
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod stores;
pub mod use_cases;

pub use app::App;
