//! Response bodies for the dice API

use std::collections::BTreeMap;

use dmhelper_domain::{DiceErrorKind, DieType, RollOutcome};
use serde::{Deserialize, Serialize};

// =============================================================================
// Rolls
// =============================================================================

/// One evaluated roll as returned by roll, history and replay endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollResponse {
    #[serde(flatten)]
    pub outcome: RollOutcome,
    /// Itemized text, e.g. `4d6dl1[3, 5, ~1, 6] = 14; total 14`
    pub breakdown: String,
    /// RFC 3339 timestamp of the original evaluation
    pub rolled_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryResponse {
    /// Most recent first
    pub rolls: Vec<RollResponse>,
    pub count: usize,
    pub capacity: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearHistoryResponse {
    pub cleared: usize,
}

// =============================================================================
// Validation
// =============================================================================

/// Result of `POST /api/dice/validate`.
///
/// Structural fields are only present when `valid` is true; `error` and
/// `message` only when it is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResponse {
    pub valid: bool,
    pub expression: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<DiceErrorKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsed_groups: Option<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dice_types: Vec<DieType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
}

// =============================================================================
// Detection / Suggestions
// =============================================================================

/// One candidate expression found in free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionDto {
    pub expression: String,
    /// In [0, 1]
    pub confidence: f64,
    /// `notation`, `ability_check`, `skill_check`, `initiative` or `special`
    pub kind: String,
    /// Matched source text
    pub matched: String,
    /// Byte offsets into the submitted text
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResponse {
    pub text: String,
    pub detections: Vec<DetectionDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionsResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub suggestions: Vec<String>,
}

// =============================================================================
// Statistics / Health
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsResponse {
    pub total_rolls: usize,
    /// Absent when the history is empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_total: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub most_common_expression: Option<String>,
    pub critical_hits: usize,
    pub critical_failures: usize,
    pub expression_counts: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceHealthResponse {
    pub status: String,
    /// Total of the throwaway self-check roll
    pub sample_total: i64,
    pub history_size: usize,
    pub history_capacity: usize,
    pub supported_dice: Vec<DieType>,
}

// =============================================================================
// Errors
// =============================================================================

/// JSON error body: `{ "error": kind, "message": text }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
