use soul_metadata::TagDialect;
use thiserror::Error;

/// Beat grid codec errors
///
/// Every error aborts a single parse or dump call. A partially decoded
/// grid is never returned.
#[derive(Debug, Error)]
pub enum BeatGridError {
    #[error("Beat grids cannot be stored in {0} tags")]
    UnsupportedDialect(TagDialect),

    #[error("Unsupported beat grid version: {major:#04x} {minor:#04x}")]
    UnsupportedVersion { major: u8, minor: u8 },

    #[error("Invalid beat grid size: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("Too many beat grid markers: {0}")]
    TooManyMarkers(usize),

    #[error("Beat grid with markers lacks a terminal marker")]
    MissingTerminalMarker,

    #[error("Invalid base64 data: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Base64 payload does not start with the beat grid header")]
    InvalidPayloadHeader,

    #[error("Invalid tag content: {0}")]
    Tag(#[from] lofty::error::LoftyError),
}

pub type Result<T> = std::result::Result<T, BeatGridError>;

impl From<BeatGridError> for soul_core::SoulError {
    fn from(err: BeatGridError) -> Self {
        soul_core::SoulError::beat_grid(err.to_string())
    }
}
