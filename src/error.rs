//!
//! Error types shared by the decoders, learners and profile builder.
//!
use thiserror::Error;

/// Errors raised by `seqhmm`.
///
/// Recoverable conditions (e.g. a count row with zero mass during
/// re-estimation) are not errors; they are reported as
/// `learn::DegenerateRow` diagnostics instead.
#[derive(Debug, Error)]
pub enum HmmError {
    /// Every cell of a DP row is zero (zero-probability prefix or underflow)
    #[error("no viable path: every state has probability zero at position {position}")]
    NoViablePath { position: usize },

    /// Malformed tabular input, with the 1-based line it was found on
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Bad arguments (length mismatches, out-of-range values, unknown labels)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Structurally impossible profile (e.g. no match columns)
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HmmError>;

/// short-hand for `HmmError::InvalidInput`
pub fn invalid<S: Into<String>>(message: S) -> HmmError {
    HmmError::InvalidInput(message.into())
}
