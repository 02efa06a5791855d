//! Error types for the dice domain
//!
//! Every error here stems from untrusted input text. None of them are
//! retryable: the same input always produces the same error.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Machine-readable classification of a dice failure.
///
/// Serialized in snake_case so HTTP clients can branch on it without
/// parsing the human-readable message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiceErrorKind {
    MalformedExpression,
    InvalidDieType,
    TooManyDice,
    InvalidMechanicArgument,
    NotFound,
}

impl DiceErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MalformedExpression => "malformed_expression",
            Self::InvalidDieType => "invalid_die_type",
            Self::TooManyDice => "too_many_dice",
            Self::InvalidMechanicArgument => "invalid_mechanic_argument",
            Self::NotFound => "not_found",
        }
    }
}

impl std::fmt::Display for DiceErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing a dice expression
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceParseError {
    /// Unparsable syntax: empty input, dangling operators, bad integers
    #[error("Malformed dice expression: {0}")]
    MalformedExpression(String),
    /// Faces outside {4, 6, 8, 10, 12, 20, 100}
    #[error("Invalid die type: d{0}. Supported: d4, d6, d8, d10, d12, d20, d100")]
    InvalidDieType(u64),
    /// Dice count outside 1..=100
    #[error("Invalid dice count: {0}. Must be between 1 and 100")]
    TooManyDice(u64),
    /// Keep/drop argument outside 1..count, or advantage on more than one die
    #[error("Invalid mechanic argument: {0}")]
    InvalidMechanicArgument(String),
}

impl DiceParseError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedExpression(msg.into())
    }

    pub fn mechanic(msg: impl Into<String>) -> Self {
        Self::InvalidMechanicArgument(msg.into())
    }

    pub fn kind(&self) -> DiceErrorKind {
        match self {
            Self::MalformedExpression(_) => DiceErrorKind::MalformedExpression,
            Self::InvalidDieType(_) => DiceErrorKind::InvalidDieType,
            Self::TooManyDice(_) => DiceErrorKind::TooManyDice,
            Self::InvalidMechanicArgument(_) => DiceErrorKind::InvalidMechanicArgument,
        }
    }
}

/// Error when reading a roll seed from text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedParseError {
    #[error("Empty seed")]
    Empty,
    #[error("Seed must be 1-16 hexadecimal digits, got '{0}'")]
    InvalidFormat(String),
}
