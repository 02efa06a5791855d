//! Infrastructure - port traits and their implementations.

pub mod clock;
pub mod config;
pub mod ports;
pub mod rng;
pub mod seed;
