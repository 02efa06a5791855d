//! DM Helper Shared - Wire-format types for the dice HTTP API
//!
//! This crate contains the request and response bodies exchanged with the
//! engine's REST endpoints.
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde and the domain crate
//! 2. **No business logic** - Pure data types and serialization
//! 3. **Seeds travel as strings** - hex text, parsed by the engine

pub mod requests;
pub mod responses;

pub use requests::{
    DetectQuery, HistoryQuery, RollDiceRequest, SuggestionsQuery, ValidateRequest,
};
pub use responses::{
    ClearHistoryResponse, DetectionDto, DetectionResponse, DiceHealthResponse, ErrorResponse,
    HistoryResponse, RollResponse, StatisticsResponse, SuggestionsResponse, ValidationResponse,
};
