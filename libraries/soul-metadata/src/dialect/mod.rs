//! Dialect adapters
//!
//! Each adapter maps the fields of one tag dialect to [`TrackMetadata`] and
//! back. Imports never fail: missing fields stay `None` and malformed
//! values are dropped with a [`Diagnostic`](crate::Diagnostic). Exports only
//! fail for tags that cannot be written at all.
//!
//! Every dialect supports:
//! - Title, artist, album, genre and comment
//! - Year as free text where the format allows it
//! - Track number and total
//!
//! Album artist, composer, grouping, BPM, ReplayGain and key are mapped
//! wherever the dialect has a native slot for them.

mod ape;
mod common;
mod id3v2;
mod mp4;
mod riff;
mod vorbis;

pub use ape::{export_track_metadata_into_ape_tag, import_track_metadata_from_ape_tag};
pub use common::{export_common_fields, import_common_fields};
pub use id3v2::{export_track_metadata_into_id3v2_tag, import_track_metadata_from_id3v2_tag};
pub use mp4::{export_track_metadata_into_mp4_tag, import_track_metadata_from_mp4_tag};
pub use riff::{
    export_track_metadata_into_riff_info_tag, import_track_metadata_from_riff_info_tag,
};
pub use vorbis::{
    export_track_metadata_into_vorbis_comment_tag, import_track_metadata_from_vorbis_comment_tag,
};

use crate::diagnostics::Diagnostics;
use crate::error::Result;
use bitflags::bitflags;
use lofty::ape::ApeTag;
use lofty::id3::v2::Id3v2Tag;
use lofty::iff::wav::RIFFInfoList;
use lofty::mp4::Ilst;
use lofty::ogg::VorbisComments;
use soul_core::TrackMetadata;
use std::fmt;

/// The supported tag dialects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagDialect {
    Id3v2,
    Ape,
    VorbisComment,
    Mp4,
    RiffInfo,
}

impl fmt::Display for TagDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Id3v2 => "ID3v2",
            Self::Ape => "APE",
            Self::VorbisComment => "Vorbis Comment",
            Self::Mp4 => "MP4",
            Self::RiffInfo => "RIFF INFO",
        };
        f.write_str(name)
    }
}

bitflags! {
    /// Fields the generic common-field writer should leave alone
    ///
    /// A dialect sets these for fields it writes through a specialized,
    /// more precise path.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct WriteOptions: u8 {
        const OMIT_COMMENT = 1 << 0;
        const OMIT_YEAR = 1 << 1;
        const OMIT_TRACK_NUMBER = 1 << 2;
    }
}

/// Import and export of canonical metadata for one tag dialect
pub trait DialectAdapter {
    /// The dialect this adapter handles
    fn dialect(&self) -> TagDialect;

    /// Read all supported fields into `metadata`
    ///
    /// Fields missing from the tag leave the corresponding field of
    /// `metadata` untouched.
    fn import_into(&self, metadata: &mut TrackMetadata, diagnostics: &mut Diagnostics);

    /// Write all supported fields of `metadata` into the tag
    ///
    /// Undefined fields are removed from the tag.
    fn export_from(
        &mut self,
        metadata: &TrackMetadata,
        diagnostics: &mut Diagnostics,
    ) -> Result<()>;
}

macro_rules! impl_dialect_adapter {
    ($tag:ty, $dialect:expr, $import:path, $export:path) => {
        impl DialectAdapter for $tag {
            fn dialect(&self) -> TagDialect {
                $dialect
            }

            fn import_into(&self, metadata: &mut TrackMetadata, diagnostics: &mut Diagnostics) {
                $import(metadata, self, diagnostics);
            }

            fn export_from(
                &mut self,
                metadata: &TrackMetadata,
                diagnostics: &mut Diagnostics,
            ) -> Result<()> {
                $export(self, metadata, diagnostics)
            }
        }
    };
}

impl_dialect_adapter!(
    Id3v2Tag,
    TagDialect::Id3v2,
    import_track_metadata_from_id3v2_tag,
    export_track_metadata_into_id3v2_tag
);
impl_dialect_adapter!(
    ApeTag,
    TagDialect::Ape,
    import_track_metadata_from_ape_tag,
    export_track_metadata_into_ape_tag
);
impl_dialect_adapter!(
    VorbisComments,
    TagDialect::VorbisComment,
    import_track_metadata_from_vorbis_comment_tag,
    export_track_metadata_into_vorbis_comment_tag
);
impl_dialect_adapter!(
    Ilst,
    TagDialect::Mp4,
    import_track_metadata_from_mp4_tag,
    export_track_metadata_into_mp4_tag
);
impl_dialect_adapter!(
    RIFFInfoList,
    TagDialect::RiffInfo,
    import_track_metadata_from_riff_info_tag,
    export_track_metadata_into_riff_info_tag
);

/// A tag of any supported dialect
///
/// This is the entry point for callers that do not care about the concrete
/// dialect. Diagnostics are forwarded to `tracing` after every call.
#[derive(Debug, Clone, PartialEq)]
pub enum DialectTag {
    Id3v2(Id3v2Tag),
    Ape(ApeTag),
    VorbisComment(VorbisComments),
    Mp4(Ilst),
    RiffInfo(RIFFInfoList),
}

impl DialectTag {
    pub fn dialect(&self) -> TagDialect {
        match self {
            Self::Id3v2(_) => TagDialect::Id3v2,
            Self::Ape(_) => TagDialect::Ape,
            Self::VorbisComment(_) => TagDialect::VorbisComment,
            Self::Mp4(_) => TagDialect::Mp4,
            Self::RiffInfo(_) => TagDialect::RiffInfo,
        }
    }

    /// Read the tag into a fresh [`TrackMetadata`]
    pub fn import_track_metadata(&self) -> TrackMetadata {
        let mut metadata = TrackMetadata::new();
        let mut diagnostics = Diagnostics::new();
        self.import_into(&mut metadata, &mut diagnostics);
        diagnostics.trace();
        metadata
    }

    /// Write `metadata` into the tag
    pub fn export_track_metadata(&mut self, metadata: &TrackMetadata) -> Result<()> {
        let mut diagnostics = Diagnostics::new();
        let result = self.export_from(metadata, &mut diagnostics);
        diagnostics.trace();
        result
    }

    /// Read the tag into `metadata`, collecting diagnostics
    pub fn import_into(&self, metadata: &mut TrackMetadata, diagnostics: &mut Diagnostics) {
        match self {
            Self::Id3v2(tag) => tag.import_into(metadata, diagnostics),
            Self::Ape(tag) => tag.import_into(metadata, diagnostics),
            Self::VorbisComment(tag) => tag.import_into(metadata, diagnostics),
            Self::Mp4(tag) => tag.import_into(metadata, diagnostics),
            Self::RiffInfo(tag) => tag.import_into(metadata, diagnostics),
        }
    }

    /// Write `metadata` into the tag, collecting diagnostics
    pub fn export_from(
        &mut self,
        metadata: &TrackMetadata,
        diagnostics: &mut Diagnostics,
    ) -> Result<()> {
        match self {
            Self::Id3v2(tag) => tag.export_from(metadata, diagnostics),
            Self::Ape(tag) => tag.export_from(metadata, diagnostics),
            Self::VorbisComment(tag) => tag.export_from(metadata, diagnostics),
            Self::Mp4(tag) => tag.export_from(metadata, diagnostics),
            Self::RiffInfo(tag) => tag.export_from(metadata, diagnostics),
        }
    }
}

impl From<Id3v2Tag> for DialectTag {
    fn from(tag: Id3v2Tag) -> Self {
        Self::Id3v2(tag)
    }
}

impl From<ApeTag> for DialectTag {
    fn from(tag: ApeTag) -> Self {
        Self::Ape(tag)
    }
}

impl From<VorbisComments> for DialectTag {
    fn from(tag: VorbisComments) -> Self {
        Self::VorbisComment(tag)
    }
}

impl From<Ilst> for DialectTag {
    fn from(tag: Ilst) -> Self {
        Self::Mp4(tag)
    }
}

impl From<RIFFInfoList> for DialectTag {
    fn from(tag: RIFFInfoList) -> Self {
        Self::RiffInfo(tag)
    }
}
