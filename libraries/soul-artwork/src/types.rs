use serde::{Deserialize, Serialize};

/// Maximum artwork size (5MB)
pub const DEFAULT_MAX_SIZE_BYTES: usize = 5 * 1024 * 1024;

/// Decoded cover art
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtworkData {
    /// Raw image bytes
    pub data: Vec<u8>,
    /// MIME type (e.g., "image/jpeg", "image/png")
    pub mime_type: String,
}

impl ArtworkData {
    /// Create new artwork data
    pub fn new(data: Vec<u8>, mime_type: String) -> Self {
        Self { data, mime_type }
    }
}

/// Limits applied while decoding embedded pictures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtworkConfig {
    /// Pictures larger than this are skipped
    pub max_size_bytes: usize,
}

impl Default for ArtworkConfig {
    fn default() -> Self {
        Self {
            max_size_bytes: DEFAULT_MAX_SIZE_BYTES,
        }
    }
}
