//! Beat grid fields in tags
//!
//! Serato keeps the grid in a `GEOB` frame for ID3v2, in a plain field for
//! Vorbis Comments and in a freeform atom for MP4. APE and RIFF INFO tags
//! have no beat grid slot.

use crate::error::{BeatGridError, Result};
use crate::format::BeatGridFormat;
use crate::grid::BeatGrid;
use lofty::id3::v2::{Frame, FrameFlags, FrameValue, GeneralEncapsulatedObject, Id3v2Tag};
use lofty::mp4::{Atom, AtomData, AtomIdent, Ilst};
use lofty::TextEncoding;
use soul_metadata::DialectTag;
use std::borrow::Cow;
use tracing::{debug, warn};

const GEOB: &str = "GEOB";
/// Description of the ID3v2 `GEOB` frame
pub const ID3V2_GEOB_DESCRIPTION: &str = "Serato BeatGrid";
/// MIME type of the ID3v2 `GEOB` frame
pub const ID3V2_GEOB_MIME_TYPE: &str = "application/octet-stream";
pub const VORBIS_COMMENT_FIELD: &str = "SERATO_BEATGRID";
/// Freeform atom `----:com.serato.dj:beatgrid`
pub const MP4_ATOM: AtomIdent<'static> = AtomIdent::Freeform {
    mean: Cow::Borrowed("com.serato.dj"),
    name: Cow::Borrowed("beatgrid"),
};

/// The beat grid object among the `GEOB` frames of an ID3v2 tag
fn general_object(frame: &Frame<'_>) -> Option<GeneralEncapsulatedObject> {
    if frame.id_str() != GEOB {
        return None;
    }
    let FrameValue::Binary(content) = frame.content() else {
        return None;
    };
    match GeneralEncapsulatedObject::parse(content) {
        Ok(object) if object.descriptor.as_deref() == Some(ID3V2_GEOB_DESCRIPTION) => {
            Some(object)
        }
        Ok(_) => None,
        Err(e) => {
            warn!("Failed to parse GEOB frame: {}", e);
            None
        }
    }
}

fn read_id3v2(tag: &Id3v2Tag) -> Option<Vec<u8>> {
    tag.into_iter()
        .find_map(general_object)
        .map(|object| object.data)
}

fn write_id3v2(tag: &mut Id3v2Tag, data: Vec<u8>) -> Result<()> {
    tag.retain(|frame| general_object(frame).is_none());
    let object = GeneralEncapsulatedObject {
        encoding: TextEncoding::Latin1,
        mime_type: Some(ID3V2_GEOB_MIME_TYPE.to_string()),
        file_name: None,
        descriptor: Some(ID3V2_GEOB_DESCRIPTION.to_string()),
        data,
    };
    let content = FrameValue::Binary(object.as_bytes());
    tag.insert(Frame::new(GEOB, content, FrameFlags::default())?);
    Ok(())
}

/// Text or binary content of the freeform atom
fn read_mp4(tag: &Ilst) -> Option<Vec<u8>> {
    tag.get(&MP4_ATOM)?.data().find_map(|data| match data {
        AtomData::UTF8(text) | AtomData::UTF16(text) => Some(text.as_bytes().to_vec()),
        AtomData::Unknown { data, .. } => Some(data.clone()),
        _ => None,
    })
}

/// Read the beat grid of a tag
///
/// Returns `Ok(None)` if the tag has no beat grid field.
pub fn read_beat_grid(tag: &DialectTag) -> Result<Option<BeatGrid>> {
    let dialect = tag.dialect();
    let format = BeatGridFormat::for_dialect(dialect)?;
    let data = match tag {
        DialectTag::Id3v2(tag) => read_id3v2(tag),
        DialectTag::VorbisComment(tag) => tag
            .get(VORBIS_COMMENT_FIELD)
            .map(|text| text.as_bytes().to_vec()),
        DialectTag::Mp4(tag) => read_mp4(tag),
        DialectTag::Ape(_) | DialectTag::RiffInfo(_) => {
            return Err(BeatGridError::UnsupportedDialect(dialect));
        }
    };
    let Some(data) = data else {
        debug!("No beat grid found in {} tag", dialect);
        return Ok(None);
    };
    BeatGrid::parse(&data, format).map(Some)
}

/// Store the beat grid in a tag, replacing any previous grid
pub fn write_beat_grid(tag: &mut DialectTag, grid: &BeatGrid) -> Result<()> {
    let dialect = tag.dialect();
    let format = BeatGridFormat::for_dialect(dialect)?;
    let data = grid.dump(format)?;
    match tag {
        DialectTag::Id3v2(tag) => write_id3v2(tag, data)?,
        DialectTag::VorbisComment(tag) => {
            tag.insert(VORBIS_COMMENT_FIELD.to_string(), base64_text(data));
        }
        DialectTag::Mp4(tag) => {
            tag.replace_atom(Atom::new(MP4_ATOM, AtomData::UTF8(base64_text(data))));
        }
        DialectTag::Ape(_) | DialectTag::RiffInfo(_) => {
            return Err(BeatGridError::UnsupportedDialect(dialect));
        }
    }
    debug!(
        "Stored beat grid with {} markers in {} tag",
        grid.non_terminal_markers().len() + usize::from(grid.terminal_marker().is_some()),
        dialect
    );
    Ok(())
}

/// The base64 format only produces ASCII
fn base64_text(data: Vec<u8>) -> String {
    data.into_iter().map(char::from).collect()
}
