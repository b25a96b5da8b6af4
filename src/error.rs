//! Error types for homework-bot
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur while polling and notifying
#[derive(Debug, Error)]
pub enum BotError {
    /// One or more required environment variables are absent or empty
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingCredentials(Vec<String>),

    /// Config file could not be read or parsed
    #[error("Config error: {0}")]
    Config(String),

    /// Transport failure reaching the status API
    #[error("Request failed: {0}")]
    Request(String),

    /// Status API answered with something other than 200
    #[error("Endpoint {endpoint} returned status {status}")]
    UnexpectedStatus { endpoint: String, status: u16 },

    /// Response body is not a JSON object
    #[error("API response is not an object")]
    ResponseNotObject,

    /// Response body lacks a required key
    #[error("API response has no '{0}' key")]
    MissingKey(String),

    /// `homeworks` is present but not an array
    #[error("API response 'homeworks' is not a list")]
    HomeworksNotList,

    /// Homework record has no usable name
    #[error("Homework record has no 'homework_name'")]
    MissingHomeworkName,

    /// Homework status is absent or not one of the known values
    #[error("Unknown homework status: {}", .0.as_deref().unwrap_or("<missing>"))]
    InvalidStatus(Option<String>),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for homework-bot operations
pub type Result<T> = std::result::Result<T, BotError>;
