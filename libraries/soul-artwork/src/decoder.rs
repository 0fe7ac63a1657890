//! Image decoding capability
//!
//! Decoding pixels is not this crate's job. A decoder only has to decide
//! whether the bytes of an embedded picture form a usable image.

use crate::error::{ArtworkError, Result};
use crate::types::{ArtworkConfig, ArtworkData};
use lofty::MimeType;

/// Turns raw picture bytes into artwork
///
/// `mime_type` is the type the tag declares for the picture, if any.
/// Returning an error marks the picture as undecodable, the selection then
/// moves on to the next candidate.
pub trait ImageDecoder {
    fn decode(&self, data: &[u8], mime_type: Option<&MimeType>) -> Result<ArtworkData>;
}

/// Image container formats recognized by their magic bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Bmp,
    Tiff,
    WebP,
}

impl ImageFormat {
    /// Detect the format from the leading bytes
    pub fn sniff(data: &[u8]) -> Option<Self> {
        match data {
            [0xFF, 0xD8, 0xFF, ..] => Some(Self::Jpeg),
            [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some(Self::Png),
            [b'G', b'I', b'F', b'8', b'7' | b'9', b'a', ..] => Some(Self::Gif),
            [b'B', b'M', ..] => Some(Self::Bmp),
            [b'I', b'I', 0x2A, 0x00, ..] | [b'M', b'M', 0x00, 0x2A, ..] => Some(Self::Tiff),
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some(Self::WebP),
            _ => None,
        }
    }

    /// The format of a declared MIME type, `None` if it is not a known image type
    pub fn from_mime_type(mime_type: &MimeType) -> Option<Self> {
        match mime_type {
            MimeType::Jpeg => Some(Self::Jpeg),
            MimeType::Png => Some(Self::Png),
            MimeType::Gif => Some(Self::Gif),
            MimeType::Bmp => Some(Self::Bmp),
            MimeType::Tiff => Some(Self::Tiff),
            _ => None,
        }
    }

    /// Whether `data` carries the signature of this format
    pub fn matches(self, data: &[u8]) -> bool {
        Self::sniff(data) == Some(self)
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Bmp => "image/bmp",
            Self::Tiff => "image/tiff",
            Self::WebP => "image/webp",
        }
    }
}

/// Accepts pictures with a known signature up to a size limit
///
/// A declared image type is decoded as such and the data has to match it.
/// The signature decides only if no type or an unknown one is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SniffingDecoder {
    max_size_bytes: usize,
}

impl SniffingDecoder {
    pub fn new(config: ArtworkConfig) -> Result<Self> {
        if config.max_size_bytes == 0 {
            return Err(ArtworkError::InvalidConfig(
                "max_size_bytes must be positive".to_string(),
            ));
        }
        Ok(Self {
            max_size_bytes: config.max_size_bytes,
        })
    }

    pub fn max_size_bytes(&self) -> usize {
        self.max_size_bytes
    }
}

impl Default for SniffingDecoder {
    fn default() -> Self {
        Self {
            max_size_bytes: ArtworkConfig::default().max_size_bytes,
        }
    }
}

impl ImageDecoder for SniffingDecoder {
    fn decode(&self, data: &[u8], mime_type: Option<&MimeType>) -> Result<ArtworkData> {
        if data.is_empty() {
            return Err(ArtworkError::Empty);
        }
        if data.len() > self.max_size_bytes {
            return Err(ArtworkError::TooLarge(data.len(), self.max_size_bytes));
        }
        let format = match mime_type.and_then(ImageFormat::from_mime_type) {
            Some(declared) if declared.matches(data) => declared,
            Some(declared) => {
                return Err(ArtworkError::MimeTypeMismatch(declared.mime_type().to_string()))
            }
            None => ImageFormat::sniff(data).ok_or(ArtworkError::UnrecognizedFormat)?,
        };
        Ok(ArtworkData::new(data.to_vec(), format.mime_type().to_string()))
    }
}
