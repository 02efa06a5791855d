//! Request bodies and query strings for the dice API

use serde::{Deserialize, Serialize};

/// Body of `POST /api/dice/roll`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollDiceRequest {
    pub expression: String,
    /// Hex seed to replay a specific roll; omitted for a fresh roll
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<String>,
}

/// Body of `POST /api/dice/validate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateRequest {
    pub expression: String,
}

/// Query of `GET /api/dice/history`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Query of `GET /api/dice/detect`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectQuery {
    pub text: String,
}

/// Query of `GET /api/dice/suggestions`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionsQuery {
    #[serde(default)]
    pub context: Option<String>,
}
