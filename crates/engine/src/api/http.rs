//! HTTP routes.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use dmhelper_domain::{RollSeed, SeedParseError};
use dmhelper_shared::{
    ClearHistoryResponse, DetectQuery, DetectionDto, DetectionResponse, DiceHealthResponse,
    ErrorResponse, HistoryQuery, HistoryResponse, RollDiceRequest, RollResponse,
    StatisticsResponse, SuggestionsQuery, SuggestionsResponse, ValidateRequest,
    ValidationResponse,
};

use crate::app::App;
use crate::stores::RollRecord;
use crate::use_cases::dice::ValidationReport;
use crate::use_cases::DiceError;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/dice/roll", post(roll_dice))
        .route("/api/dice/validate", post(validate_expression))
        .route("/api/dice/history", get(get_history).delete(clear_history))
        .route("/api/dice/history/{seed}", get(replay_roll))
        .route("/api/dice/detect", get(detect_dice))
        .route("/api/dice/statistics", get(get_statistics))
        .route("/api/dice/suggestions", get(get_suggestions))
        .route("/api/dice/health", get(dice_health))
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Rolls
// =============================================================================

async fn roll_dice(
    State(app): State<Arc<App>>,
    payload: Result<Json<RollDiceRequest>, JsonRejection>,
) -> Result<Json<RollResponse>, ApiError> {
    let Json(request) = payload?;
    let seed = request.seed.as_deref().map(RollSeed::parse).transpose()?;
    let record = app
        .use_cases
        .dice
        .roll
        .execute(&request.expression, seed)
        .map_err(|e| {
            tracing::warn!(expression = %request.expression, error = %e, "Rejected dice roll");
            ApiError::from(e)
        })?;
    Ok(Json(roll_response(record)))
}

async fn validate_expression(
    State(app): State<Arc<App>>,
    payload: Result<Json<ValidateRequest>, JsonRejection>,
) -> Result<Json<ValidationResponse>, ApiError> {
    let Json(request) = payload?;
    let report = app.use_cases.dice.validate.execute(&request.expression);
    let response = match report {
        ValidationReport::Valid {
            normalized,
            parsed_groups,
            dice_types,
            min,
            max,
        } => ValidationResponse {
            valid: true,
            expression: request.expression,
            normalized: Some(normalized),
            error: None,
            message: None,
            parsed_groups: Some(parsed_groups),
            dice_types,
            min: Some(min),
            max: Some(max),
        },
        ValidationReport::Invalid { error, message } => ValidationResponse {
            valid: false,
            expression: request.expression,
            normalized: None,
            error: Some(error),
            message: Some(message),
            parsed_groups: None,
            dice_types: Vec::new(),
            min: None,
            max: None,
        },
    };
    Ok(Json(response))
}

// =============================================================================
// History
// =============================================================================

async fn get_history(
    State(app): State<Arc<App>>,
    Query(query): Query<HistoryQuery>,
) -> Json<HistoryResponse> {
    let history = &app.use_cases.dice.history;
    let rolls: Vec<RollResponse> = history
        .list(query.limit)
        .into_iter()
        .map(roll_response)
        .collect();
    Json(HistoryResponse {
        count: rolls.len(),
        rolls,
        capacity: history.capacity(),
    })
}

async fn clear_history(State(app): State<Arc<App>>) -> Json<ClearHistoryResponse> {
    let cleared = app.use_cases.dice.history.clear();
    Json(ClearHistoryResponse { cleared })
}

async fn replay_roll(
    State(app): State<Arc<App>>,
    Path(seed): Path<String>,
) -> Result<Json<RollResponse>, ApiError> {
    let seed = RollSeed::parse(&seed)?;
    let record = app.use_cases.dice.replay.execute(seed)?;
    Ok(Json(roll_response(record)))
}

async fn get_statistics(State(app): State<Arc<App>>) -> Json<StatisticsResponse> {
    let stats = app.use_cases.dice.history.statistics();
    Json(StatisticsResponse {
        total_rolls: stats.total_rolls,
        average_total: stats.average_total,
        most_common_expression: stats.most_common_expression,
        critical_hits: stats.critical_hits,
        critical_failures: stats.critical_failures,
        expression_counts: stats.expression_counts,
    })
}

// =============================================================================
// Detection / Suggestions / Health
// =============================================================================

async fn detect_dice(
    State(app): State<Arc<App>>,
    Query(query): Query<DetectQuery>,
) -> Json<DetectionResponse> {
    let detections = app
        .use_cases
        .dice
        .detect
        .execute(&query.text)
        .into_iter()
        .map(|d| DetectionDto {
            expression: d.expression,
            confidence: d.confidence,
            kind: d.kind.as_str().to_string(),
            matched: d.matched,
            start: d.start,
            end: d.end,
        })
        .collect();
    Json(DetectionResponse {
        text: query.text,
        detections,
    })
}

async fn get_suggestions(
    State(app): State<Arc<App>>,
    Query(query): Query<SuggestionsQuery>,
) -> Json<SuggestionsResponse> {
    let suggestions = app
        .use_cases
        .dice
        .suggest
        .execute(query.context.as_deref());
    Json(SuggestionsResponse {
        context: query.context,
        suggestions,
    })
}

async fn dice_health(State(app): State<Arc<App>>) -> Result<Json<DiceHealthResponse>, ApiError> {
    let health = app
        .use_cases
        .dice
        .health
        .execute()
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(Json(DiceHealthResponse {
        status: "ok".to_string(),
        sample_total: health.sample_total,
        history_size: health.history_size,
        history_capacity: health.history_capacity,
        supported_dice: health.supported_dice,
    }))
}

fn roll_response(record: RollRecord) -> RollResponse {
    RollResponse {
        breakdown: record.outcome.breakdown(),
        rolled_at: record.rolled_at.to_rfc3339(),
        outcome: record.outcome,
    }
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest { error: String, message: String },
    Internal(String),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::NotFound(message) => (
                axum::http::StatusCode::NOT_FOUND,
                Json(ErrorResponse::new("not_found", message)),
            )
                .into_response(),
            ApiError::BadRequest { error, message } => (
                axum::http::StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(error, message)),
            )
                .into_response(),
            ApiError::Internal(message) => {
                tracing::error!(error = %message, "Internal error");
                (
                    axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new("internal", "Internal error")),
                )
                    .into_response()
            }
        }
    }
}

impl From<DiceError> for ApiError {
    fn from(e: DiceError) -> Self {
        match e {
            DiceError::NotFound(_) => ApiError::NotFound(e.to_string()),
            DiceError::Parse(ref parse) => ApiError::BadRequest {
                error: parse.kind().to_string(),
                message: e.to_string(),
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::BadRequest {
            error: "invalid_request".to_string(),
            message: e.body_text(),
        }
    }
}

impl From<SeedParseError> for ApiError {
    fn from(e: SeedParseError) -> Self {
        ApiError::BadRequest {
            error: "invalid_seed".to_string(),
            message: e.to_string(),
        }
    }
}
