use thiserror::Error;

/// Errors that can occur while decoding embedded artwork
///
/// Cover selection never fails as a whole. These errors describe why a
/// single candidate picture was skipped.
#[derive(Debug, Error)]
pub enum ArtworkError {
    /// Picture without any image data
    #[error("Empty image data")]
    Empty,

    /// Artwork too large
    #[error("Artwork too large: {0} bytes (max {1} bytes)")]
    TooLarge(usize, usize),

    /// Image data does not start with a known signature
    #[error("Unrecognized image format")]
    UnrecognizedFormat,

    /// Image data does not match the declared MIME type
    #[error("Image data is not of declared type {0}")]
    MimeTypeMismatch(String),

    /// Legacy text field is not valid base64
    #[error("Invalid base64 data: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Legacy FLAC picture block could not be parsed
    #[error("Invalid picture block: {0}")]
    PictureBlock(#[from] lofty::error::LoftyError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for artwork operations
pub type Result<T> = std::result::Result<T, ArtworkError>;

impl From<ArtworkError> for soul_core::SoulError {
    fn from(err: ArtworkError) -> Self {
        soul_core::SoulError::artwork(err.to_string())
    }
}
