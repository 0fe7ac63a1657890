//! Soul Player Metadata
//!
//! Tag dialect adapters for Soul Player.
//!
//! This crate provides:
//! - Import and export of canonical [`TrackMetadata`](soul_core::TrackMetadata)
//!   for the ID3v2, APE, Vorbis Comment, MP4 and RIFF INFO tags of `lofty`
//! - Field resolution and normalization helpers (BPM, ReplayGain, dates,
//!   track numbers)
//! - Structured diagnostics instead of direct logging
//!
//! Reading and writing the tag bytes of a file is left to `lofty`. The
//! adapters only map fields between its tag types and `TrackMetadata`.
//!
//! # Example
//!
//! ```rust
//! use soul_core::{Bpm, TrackMetadata};
//! use lofty::id3::v2::Id3v2Tag;
//! use soul_metadata::{
//!     export_track_metadata_into_id3v2_tag, import_track_metadata_from_id3v2_tag, Diagnostics,
//! };
//!
//! let mut metadata = TrackMetadata::new();
//! metadata.title = Some("Title".to_string());
//! metadata.bpm = Bpm::new(128.0);
//!
//! let mut tag = Id3v2Tag::new();
//! let mut diagnostics = Diagnostics::new();
//! export_track_metadata_into_id3v2_tag(&mut tag, &metadata, &mut diagnostics)?;
//!
//! let mut imported = TrackMetadata::new();
//! import_track_metadata_from_id3v2_tag(&mut imported, &tag, &mut diagnostics);
//! assert_eq!(imported, metadata);
//! # Ok::<(), soul_metadata::MetadataError>(())
//! ```

pub mod diagnostics;
pub mod dialect;
mod error;
pub mod normalize;
pub mod resolve;

pub use diagnostics::{Diagnostic, Diagnostics, TagField};
pub use dialect::{
    export_track_metadata_into_ape_tag, export_track_metadata_into_id3v2_tag,
    export_track_metadata_into_mp4_tag, export_track_metadata_into_riff_info_tag,
    export_track_metadata_into_vorbis_comment_tag, import_track_metadata_from_ape_tag,
    import_track_metadata_from_id3v2_tag, import_track_metadata_from_mp4_tag,
    import_track_metadata_from_riff_info_tag, import_track_metadata_from_vorbis_comment_tag,
    DialectAdapter, DialectTag, TagDialect, WriteOptions,
};
pub use error::{MetadataError, Result};
