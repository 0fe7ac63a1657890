/// Core error types for Soul Player
use thiserror::Error;

/// Result type alias using `SoulError`
pub type Result<T> = std::result::Result<T, SoulError>;

/// Core error type for Soul Player
#[derive(Error, Debug)]
pub enum SoulError {
    /// Metadata parsing or tag mapping errors
    #[error("Metadata error: {0}")]
    Metadata(String),

    /// Artwork extraction errors
    #[error("Artwork error: {0}")]
    Artwork(String),

    /// Beat grid parsing or serialization errors
    #[error("Beat grid error: {0}")]
    BeatGrid(String),

    /// Tempo outside of the valid range
    #[error("Invalid BPM: {0}")]
    InvalidBpm(f64),
}

impl SoulError {
    /// Create a metadata error
    pub fn metadata(msg: impl Into<String>) -> Self {
        Self::Metadata(msg.into())
    }

    /// Create an artwork error
    pub fn artwork(msg: impl Into<String>) -> Self {
        Self::Artwork(msg.into())
    }

    /// Create a beat grid error
    pub fn beat_grid(msg: impl Into<String>) -> Self {
        Self::BeatGrid(msg.into())
    }
}
