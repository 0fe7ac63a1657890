//! Soul Artwork - Cover art selection from embedded tag pictures
//!
//! Audio files often carry several pictures, and the purpose of a picture is
//! not always declared. This crate picks the one that best serves as cover
//! art for each supported tag dialect.
//!
//! # Features
//!
//! - Priority selection by picture type (front cover, media, illustration,
//!   other) with a fallback to any decodable picture
//! - Legacy Vorbis Comment storage (`METADATA_BLOCK_PICTURE`, `COVERART`)
//! - Pluggable image decoding with a size limit, guided by the declared
//!   MIME type of a picture
//!
//! # Example
//!
//! ```rust
//! use lofty::id3::v2::Id3v2Tag;
//! use lofty::{MimeType, Picture, PictureType};
//! use soul_artwork::{import_cover_image, SniffingDecoder};
//! use soul_metadata::DialectTag;
//!
//! let jpeg = vec![0xFF, 0xD8, 0xFF, 0xE0];
//! let mut tag = Id3v2Tag::new();
//! tag.insert_picture(Picture::new_unchecked(
//!     PictureType::CoverFront,
//!     Some(MimeType::Jpeg),
//!     None,
//!     jpeg,
//! ));
//!
//! let artwork = import_cover_image(&DialectTag::from(tag), &SniffingDecoder::default());
//! assert_eq!(artwork.map(|artwork| artwork.mime_type).as_deref(), Some("image/jpeg"));
//! ```

mod decoder;
mod error;
mod import;
mod types;

// Re-export public API
pub use decoder::{ImageDecoder, ImageFormat, SniffingDecoder};
pub use error::{ArtworkError, Result};
pub use import::{
    import_cover_image, import_cover_image_from_ape_tag, import_cover_image_from_id3v2_tag,
    import_cover_image_from_mp4_tag, import_cover_image_from_vorbis_comment_tag,
    PREFERRED_PICTURE_TYPES,
};
pub use types::{ArtworkConfig, ArtworkData, DEFAULT_MAX_SIZE_BYTES};
