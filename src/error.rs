use serde_json::{json, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limit exceeded, please try again later")]
    RateLimited,

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("No matches found for this player")]
    NoGames,

    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

/// Expected "no answer" outcomes of an analysis. Callers render these as
/// `{"error": <message>}` instead of treating them as crashes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("{0} not found.")]
    NotFound(String),

    #[error("{0}")]
    NoData(String),

    #[error("Not enough data: need at least {needed} games, found {found}.")]
    InsufficientData { needed: usize, found: usize },
}

impl AnalysisError {
    pub fn to_payload(&self) -> Value {
        json!({ "error": self.to_string() })
    }
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
