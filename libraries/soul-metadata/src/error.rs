/// Metadata-specific errors
use thiserror::Error;

/// Result type alias using `MetadataError`
pub type Result<T> = std::result::Result<T, MetadataError>;

/// Metadata error types
///
/// Individual fields never fail an import or export. These errors are
/// reserved for conditions that make a whole tag unusable.
#[derive(Error, Debug)]
pub enum MetadataError {
    /// The tag version cannot be written
    #[error("Unsupported tag version: {0}")]
    UnsupportedTagVersion(String),

    /// A frame or item could not be built
    #[error("Invalid tag content: {0}")]
    Tag(#[from] lofty::LoftyError),
}

impl From<MetadataError> for soul_core::SoulError {
    fn from(err: MetadataError) -> Self {
        soul_core::SoulError::metadata(err.to_string())
    }
}
