use thiserror::Error;

/// Failures surfaced by the segmentation and synthesis engines.
///
/// Degenerate numeric ranges (zero variance, zero score range) are not
/// errors; they fall back to zero and never propagate as NaN/Inf.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Malformed input: empty feature matrix, mismatched track lengths,
    /// non-ascending beat grid, bad boundaries, or a mood map missing a
    /// required model.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Not enough beats to form a rolling comparison window.
    #[error("insufficient data: {beats} beats, but the rolling window needs at least {needed}")]
    InsufficientData { beats: usize, needed: usize },

    /// The caller cancelled the run through its progress sink.
    #[error("analysis cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, EngineError>;

impl EngineError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        EngineError::InvalidInput(msg.into())
    }
}
