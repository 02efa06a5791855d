//! Validate expression use case.

use dmhelper_domain::{DiceErrorKind, DiceExpression, DieType};

/// Structural summary of a valid expression, or why it is invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationReport {
    Valid {
        normalized: String,
        parsed_groups: usize,
        dice_types: Vec<DieType>,
        min: i64,
        max: i64,
    },
    Invalid {
        error: DiceErrorKind,
        message: String,
    },
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }
}

/// Parses without rolling. Never touches the history.
pub struct ValidateExpression;

impl ValidateExpression {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, text: &str) -> ValidationReport {
        match DiceExpression::parse(text) {
            Ok(expression) => ValidationReport::Valid {
                normalized: expression.to_string(),
                parsed_groups: expression.groups().len(),
                dice_types: expression.dice_types(),
                min: expression.min_total(),
                max: expression.max_total(),
            },
            Err(e) => ValidationReport::Invalid {
                error: e.kind(),
                message: e.to_string(),
            },
        }
    }
}

impl Default for ValidateExpression {
    fn default() -> Self {
        Self::new()
    }
}
