/// ID3v2 adapter
///
/// Only ID3v2.3 and ID3v2.4 can be written. lofty reads the ID3v2.3 `TYER`
/// frame into `TDRC`, so `TDRC` holds the full recording time for ID3v2.4
/// and only the year for ID3v2.3, with day and month in `TDAT`.
use super::common::{import_common_fields, numeric_text, split_part};
use crate::diagnostics::{Diagnostic, Diagnostics, TagField};
use crate::error::{MetadataError, Result};
use crate::normalize::date::{
    format_id3v2_tdat, format_id3v2_tyer, parse_id3v2_year_and_date, ID3V2_TYER_LEN,
};
use crate::normalize::{
    calendar_year, format_bpm_integer, format_date, format_gain_db, format_peak,
    import_track_gain, import_track_peak, join_strings, parse_bpm_repairing_decimal, parse_date,
    split_combined,
};
use crate::resolve::{first_non_empty_value, keys_match};
use chrono::Datelike;
use lofty::id3::v2::{
    CommentFrame, ExtendedTextFrame, Frame, FrameFlags, FrameValue, Id3v2Tag, Id3v2Version,
    TextInformationFrame,
};
use lofty::{TagExt, TextEncoding};
use soul_core::{Bpm, TrackMetadata};

const TITLE: &str = "TIT2";
const ARTIST: &str = "TPE1";
const ALBUM: &str = "TALB";
const ORIGINAL_ALBUM: &str = "TOAL";
const ALBUM_ARTIST: &str = "TPE2";
const COMPOSER: &str = "TCOM";
const GROUPING: &str = "TIT1";
const GENRE: &str = "TCON";
const RECORDING_TIME: &str = "TDRC";
const DATE: &str = "TDAT";
const TRACK: &str = "TRCK";
const BPM: &str = "TBPM";
const KEY: &str = "TKEY";
const USER_TEXT: &str = "TXXX";
const COMMENT: &str = "COMM";

const UNKNOWN_LANGUAGE: [u8; 3] = *b"XXX";

/// Description of the mislabeled `TXXX` comment frames written by ffmpeg
const COMMENT_USER_TEXT: &str = "COMMENT";

const REPLAYGAIN_TRACK_GAIN: &str = "REPLAYGAIN_TRACK_GAIN";
const REPLAYGAIN_TRACK_PEAK: &str = "REPLAYGAIN_TRACK_PEAK";

/// Encoding of newly written text frames
///
/// ID3v2.3 has no UTF-8, numbers and URLs fit into Latin-1.
fn text_encoding(version: Id3v2Version, numeric_or_url: bool) -> TextEncoding {
    match version {
        Id3v2Version::V4 => TextEncoding::UTF8,
        _ if numeric_or_url => TextEncoding::Latin1,
        _ => TextEncoding::UTF16,
    }
}

fn frame_text<'a>(frame: &'a Frame<'_>) -> Option<&'a str> {
    match frame.content() {
        FrameValue::Text(TextInformationFrame { value, .. }) => Some(value),
        _ => None,
    }
}

fn described_content<'a>(frame: &'a Frame<'_>) -> Option<(&'a str, &'a str)> {
    match frame.content() {
        FrameValue::Comment(CommentFrame {
            description,
            content,
            ..
        })
        | FrameValue::UserText(ExtendedTextFrame {
            description,
            content,
            ..
        }) => Some((description, content)),
        _ => None,
    }
}

fn is_described(frame: &Frame<'_>, id: &str, description: &str) -> bool {
    frame.id_str() == id
        && described_content(frame).is_some_and(|(other, _)| keys_match(other, description))
}

/// Frame access `Id3v2Tag` does not provide
///
/// Descriptions of `COMM` and `TXXX` frames match case-insensitively, and
/// among duplicate frames the first non-empty value wins.
trait Id3v2TagExt {
    fn text(&self, id: &str) -> Option<&str>;

    fn described_text(&self, id: &str, description: &str) -> Option<&str>;

    fn remove_frames(&mut self, id: &str);

    /// Remove all `COMM` or `TXXX` frames with a description
    fn remove_described(&mut self, id: &str, description: &str) -> usize;

    /// Replace all frames of `id` with a single one, or none if `text` is empty
    fn set_text_frame(&mut self, id: &'static str, text: &str, encoding: TextEncoding)
        -> Result<()>;

    /// Replace all described frames with a single one, or none if `text` is empty
    fn set_described_text(
        &mut self,
        id: &'static str,
        description: &str,
        text: &str,
        encoding: TextEncoding,
    ) -> Result<()>;
}

impl Id3v2TagExt for Id3v2Tag {
    fn text(&self, id: &str) -> Option<&str> {
        let mut values = self
            .into_iter()
            .filter(|frame| frame.id_str() == id)
            .filter_map(frame_text)
            .peekable();
        values.peek()?;
        Some(first_non_empty_value(values))
    }

    fn described_text(&self, id: &str, description: &str) -> Option<&str> {
        let mut values = self
            .into_iter()
            .filter(|frame| is_described(frame, id, description))
            .filter_map(|frame| described_content(frame).map(|(_, content)| content))
            .peekable();
        values.peek()?;
        Some(first_non_empty_value(values))
    }

    fn remove_frames(&mut self, id: &str) {
        self.retain(|frame| frame.id_str() != id);
    }

    fn remove_described(&mut self, id: &str, description: &str) -> usize {
        let before = self.len();
        self.retain(|frame| !is_described(frame, id, description));
        before - self.len()
    }

    fn set_text_frame(
        &mut self,
        id: &'static str,
        text: &str,
        encoding: TextEncoding,
    ) -> Result<()> {
        self.remove_frames(id);
        if !text.is_empty() {
            let value = TextInformationFrame {
                encoding,
                value: text.to_string(),
            };
            self.insert(Frame::new(id, value, FrameFlags::default())?);
        }
        Ok(())
    }

    fn set_described_text(
        &mut self,
        id: &'static str,
        description: &str,
        text: &str,
        encoding: TextEncoding,
    ) -> Result<()> {
        self.remove_described(id, description);
        if text.is_empty() {
            return Ok(());
        }
        let value = if id == COMMENT {
            FrameValue::Comment(CommentFrame {
                encoding,
                language: UNKNOWN_LANGUAGE,
                description: description.to_string(),
                content: text.to_string(),
            })
        } else {
            FrameValue::UserText(ExtendedTextFrame {
                encoding,
                description: description.to_string(),
                content: text.to_string(),
            })
        };
        self.insert(Frame::new(id, value, FrameFlags::default())?);
        Ok(())
    }
}

/// Read an ID3v2 tag into `metadata`
pub fn import_track_metadata_from_id3v2_tag(
    metadata: &mut TrackMetadata,
    tag: &Id3v2Tag,
    diagnostics: &mut Diagnostics,
) {
    import_common_fields(tag, metadata);

    // Some encoders store the comment in TXXX:COMMENT instead of COMM
    let comment = tag.described_text(COMMENT, "");
    let fallback = tag.described_text(USER_TEXT, COMMENT_USER_TEXT);
    let comment = match (comment, fallback) {
        (Some(comment), _) if !comment.is_empty() => Some(comment),
        (_, Some(fallback)) if !fallback.is_empty() => Some(fallback),
        (comment, fallback) => comment.or(fallback),
    };
    if let Some(comment) = comment {
        metadata.comment = Some(comment.to_string());
    }

    if metadata.album.as_deref().map_or(true, str::is_empty) {
        if let Some(original_album) = tag.text(ORIGINAL_ALBUM) {
            metadata.album = Some(original_album.to_string());
        }
    }

    if let Some(album_artist) = tag.text(ALBUM_ARTIST) {
        metadata.album_artist = Some(album_artist.to_string());
    }
    if let Some(composer) = tag.text(COMPOSER) {
        metadata.composer = Some(composer.to_string());
    }
    if let Some(grouping) = tag.text(GROUPING) {
        metadata.grouping = Some(grouping.to_string());
    }

    if let Some(year) = import_year(tag) {
        metadata.year = Some(year);
    }

    if let Some(track) = tag.text(TRACK) {
        let (number, total) = split_combined(track);
        metadata.track_number = split_part(number);
        metadata.track_total = split_part(total);
    }

    if let Some(bpm) = numeric_text(tag.text(BPM)) {
        if let Some(bpm) = parse_bpm_repairing_decimal(bpm, Bpm::MAX_VALUE, diagnostics) {
            metadata.bpm = Some(bpm);
        }
    }

    if let Some(key) = tag.text(KEY) {
        metadata.key = Some(key.to_string());
    }

    if let Some(gain) = numeric_text(tag.described_text(USER_TEXT, REPLAYGAIN_TRACK_GAIN)) {
        import_track_gain(metadata, gain, diagnostics);
    }
    if let Some(peak) = numeric_text(tag.described_text(USER_TEXT, REPLAYGAIN_TRACK_PEAK)) {
        import_track_peak(metadata, peak, diagnostics);
    }
}

/// `TDRC`, completed by `TDAT` if it only holds a year
fn import_year(tag: &Id3v2Tag) -> Option<String> {
    let recording_time = tag.text(RECORDING_TIME).unwrap_or_default();
    let year = recording_time.trim();
    if year.len() == ID3V2_TYER_LEN {
        let date = tag.text(DATE).unwrap_or_default().trim();
        if let Some(date) = parse_id3v2_year_and_date(year, date) {
            return Some(format_date(date));
        }
    }
    (!year.is_empty()).then(|| recording_time.to_string())
}

/// Write `metadata` into an ID3v2 tag
///
/// The layout follows the version the tag was read with. Fails for ID3v2.2
/// tags, which cannot be written.
pub fn export_track_metadata_into_id3v2_tag(
    tag: &mut Id3v2Tag,
    metadata: &TrackMetadata,
    diagnostics: &mut Diagnostics,
) -> Result<()> {
    let version = tag.original_version();
    export_track_metadata_as(tag, version, metadata, diagnostics)
}

fn export_track_metadata_as(
    tag: &mut Id3v2Tag,
    version: Id3v2Version,
    metadata: &TrackMetadata,
    diagnostics: &mut Diagnostics,
) -> Result<()> {
    if version == Id3v2Version::V2 {
        return Err(MetadataError::UnsupportedTagVersion(format!("{version:?}")));
    }
    let text = text_encoding(version, false);
    let numeric = text_encoding(version, true);

    // The generic setters of lofty always write UTF-8, so even the baseline
    // fields go through the version-aware path
    tag.set_text_frame(TITLE, metadata.title.as_deref().unwrap_or_default(), text)?;
    tag.set_text_frame(ARTIST, metadata.artist.as_deref().unwrap_or_default(), text)?;
    tag.set_text_frame(ALBUM, metadata.album.as_deref().unwrap_or_default(), text)?;
    tag.set_text_frame(GENRE, metadata.genre.as_deref().unwrap_or_default(), text)?;

    // Only the default COMM frame is written, special purpose ones like
    // "iTunSMPB" are kept
    export_comment(tag, metadata.comment.as_deref().unwrap_or_default(), text, diagnostics)?;

    let track = join_strings(
        metadata.track_number.as_deref().unwrap_or_default(),
        metadata.track_total.as_deref().unwrap_or_default(),
    );
    tag.set_text_frame(TRACK, &track, text)?;

    export_year(tag, version, metadata.year.as_deref().unwrap_or_default(), diagnostics)?;

    tag.set_text_frame(
        ALBUM_ARTIST,
        metadata.album_artist.as_deref().unwrap_or_default(),
        text,
    )?;
    tag.set_text_frame(COMPOSER, metadata.composer.as_deref().unwrap_or_default(), text)?;
    tag.set_text_frame(GROUPING, metadata.grouping.as_deref().unwrap_or_default(), text)?;

    // TBPM is an integer by definition
    tag.set_text_frame(BPM, &format_bpm_integer(metadata.bpm), numeric)?;

    tag.set_text_frame(KEY, metadata.key.as_deref().unwrap_or_default(), text)?;

    tag.set_described_text(
        USER_TEXT,
        REPLAYGAIN_TRACK_GAIN,
        &format_gain_db(metadata.replay_gain.gain_db),
        numeric,
    )?;
    tag.set_described_text(
        USER_TEXT,
        REPLAYGAIN_TRACK_PEAK,
        &format_peak(metadata.replay_gain.peak),
        numeric,
    )?;

    Ok(())
}

/// Write the default `COMM` frame and drop `TXXX:COMMENT` duplicates
fn export_comment(
    tag: &mut Id3v2Tag,
    comment: &str,
    encoding: TextEncoding,
    diagnostics: &mut Diagnostics,
) -> Result<()> {
    tag.set_described_text(COMMENT, "", comment, encoding)?;

    let count = tag.remove_described(USER_TEXT, COMMENT_USER_TEXT);
    if count > 0 {
        diagnostics.push(Diagnostic::NonStandardFieldsRemoved {
            field: format!("{USER_TEXT}:{COMMENT_USER_TEXT}"),
            count,
        });
    }
    Ok(())
}

/// Full date in `TDRC` for ID3v2.4, year and `TDAT` otherwise
///
/// A year without a recognizable calendar year is reported and the
/// previous frames are kept.
fn export_year(
    tag: &mut Id3v2Tag,
    version: Id3v2Version,
    year: &str,
    diagnostics: &mut Diagnostics,
) -> Result<()> {
    if year.trim().is_empty() {
        tag.remove_frames(RECORDING_TIME);
        tag.remove_frames(DATE);
        return Ok(());
    }
    if version == Id3v2Version::V4 {
        tag.set_text_frame(RECORDING_TIME, year, text_encoding(version, false))?;
        tag.remove_frames(DATE);
        return Ok(());
    }

    let numeric = text_encoding(version, true);
    if let Some(date) = parse_date(year) {
        tag.set_text_frame(RECORDING_TIME, &format_id3v2_tyer(date.year()), numeric)?;
        tag.set_text_frame(DATE, &format_id3v2_tdat(date), numeric)?;
    } else if let Some(calendar_year) = calendar_year(year) {
        tag.set_text_frame(RECORDING_TIME, &format_id3v2_tyer(calendar_year), numeric)?;
        tag.remove_frames(DATE);
    } else {
        diagnostics.push(Diagnostic::MalformedValue {
            field: TagField::Year,
            value: year.to_string(),
        });
    }
    Ok(())
}
