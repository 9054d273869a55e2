//! Error types for configuration and content loading
//!
//! The simulation itself never fails; only data coming from outside the
//! crate (settings files, content JSON) can be rejected.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid setting `{field}`: {reason}")]
    InvalidSetting { field: &'static str, reason: String },

    #[error("invalid content: {0}")]
    InvalidContent(String),

    #[error("unknown answer choice `{0}` (expected a, b, c or d)")]
    UnknownChoice(String),

    #[error("invalid color `{0}` (expected #rrggbb)")]
    Color(String),
}

pub type Result<T> = std::result::Result<T, Error>;
