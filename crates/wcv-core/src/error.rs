//! Error types for configuration and parameter handling.
//!
//! The detection algorithms themselves never fail; they report the
//! no-conflict or invalid interval instead. Errors only arise when text or
//! configuration is turned into typed values.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WcvError {
    #[error("unknown unit `{0}`")]
    UnknownUnit(String),

    #[error("unknown horizontal time variable `{0}` (expected taumod, tcpa or tep)")]
    UnknownTvar(String),

    #[error("threshold {name} must be finite and non-negative, got {value}")]
    InvalidThreshold { name: &'static str, value: f64 },

    #[error("parameter `{key}` has malformed value `{value}`")]
    MalformedParameter { key: String, value: String },

    #[error("line {line}: expected `key = value`, got `{text}`")]
    MalformedLine { line: usize, text: String },

    #[error("invalid detector configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, WcvError>;
