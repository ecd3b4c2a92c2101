use thiserror::Error;

/// Recoverable failures surfaced by the core. None of these stop a session:
/// callers log them and fall back (mouse-only input, placeholder photos).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("gesture recognizer unavailable: {0}")]
    GestureUnavailable(String),

    #[error("failed to load asset `{id}`: {reason}")]
    AssetLoad { id: String, reason: String },

    #[error("expected {expected} landmark values, got {got}")]
    InvalidLandmarks { expected: usize, got: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
