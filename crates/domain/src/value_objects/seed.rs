//! Roll seed value object
//!
//! A seed together with an expression deterministically reproduces a roll.
//! Textual form is lowercase hex so it survives JSON clients that cannot
//! hold a full u64 as a number.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SeedParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RollSeed(u64);

impl RollSeed {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Parse a caller-supplied seed (1-16 hex digits, case-insensitive).
    pub fn parse(input: &str) -> Result<Self, SeedParseError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(SeedParseError::Empty);
        }
        if input.len() > 16 || !input.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(SeedParseError::InvalidFormat(input.to_string()));
        }
        u64::from_str_radix(input, 16)
            .map(Self)
            .map_err(|_| SeedParseError::InvalidFormat(input.to_string()))
    }
}

impl From<u64> for RollSeed {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for RollSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl FromStr for RollSeed {
    type Err = SeedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for RollSeed {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RollSeed {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
