use thiserror::Error;

use crate::domain::ItemId;

#[derive(Error, Debug)]
pub enum HnError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    // Upstream errors
    #[error("Failed to load top stories: {0}")]
    Listing(String),

    #[error("Failed to resolve item {id}: {reason}")]
    ItemResolution { id: ItemId, reason: String },

    // Network errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type HnResult<T> = Result<T, HnError>;
