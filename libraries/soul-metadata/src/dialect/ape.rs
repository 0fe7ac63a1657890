/// APEv2 adapter
///
/// Year and track are free text items, so they are passed through without
/// any conversion. The musical key has no APE item and is not written.
use super::common::{export_common_fields, import_common_fields, numeric_text, split_part};
use super::WriteOptions;
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::normalize::{
    format_bpm, format_gain_db, format_peak, import_track_gain, import_track_peak,
    join_strings, parse_bpm, split_combined,
};
use lofty::ape::{ApeItem, ApeTag};
use lofty::ItemValue;
use soul_core::TrackMetadata;

const ALBUM_ARTIST: &str = "Album Artist";
const COMPOSER: &str = "Composer";
const GROUPING: &str = "Grouping";
const YEAR: &str = "Year";
const TRACK: &str = "Track";
const BPM: &str = "BPM";
const REPLAYGAIN_TRACK_GAIN: &str = "REPLAYGAIN_TRACK_GAIN";
const REPLAYGAIN_TRACK_PEAK: &str = "REPLAYGAIN_TRACK_PEAK";

/// Text value of an item, binary and locator items are ignored
fn text<'a>(tag: &'a ApeTag, key: &str) -> Option<&'a str> {
    match tag.get(key)?.value() {
        ItemValue::Text(text) => Some(text),
        _ => None,
    }
}

/// Replace a text item, an empty value removes it
fn set_text(tag: &mut ApeTag, key: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        tag.remove(key);
    } else {
        tag.insert(ApeItem::new(
            key.to_string(),
            ItemValue::Text(value.to_string()),
        )?);
    }
    Ok(())
}

/// Read an APE tag into `metadata`
pub fn import_track_metadata_from_ape_tag(
    metadata: &mut TrackMetadata,
    tag: &ApeTag,
    diagnostics: &mut Diagnostics,
) {
    import_common_fields(tag, metadata);

    if let Some(album_artist) = text(tag, ALBUM_ARTIST) {
        metadata.album_artist = Some(album_artist.to_string());
    }
    if let Some(composer) = text(tag, COMPOSER) {
        metadata.composer = Some(composer.to_string());
    }
    if let Some(grouping) = text(tag, GROUPING) {
        metadata.grouping = Some(grouping.to_string());
    }

    // ISO 8601 release date as mapped by MusicBrainz Picard
    if let Some(year) = text(tag, YEAR) {
        metadata.year = Some(year.to_string());
    }

    if let Some(track) = text(tag, TRACK) {
        let (number, total) = split_combined(track);
        metadata.track_number = split_part(number);
        metadata.track_total = split_part(total);
    }

    if let Some(bpm) = numeric_text(text(tag, BPM)) {
        if let Some(bpm) = parse_bpm(bpm) {
            metadata.bpm = Some(bpm);
        }
    }

    if let Some(gain) = numeric_text(text(tag, REPLAYGAIN_TRACK_GAIN)) {
        import_track_gain(metadata, gain, diagnostics);
    }
    if let Some(peak) = numeric_text(text(tag, REPLAYGAIN_TRACK_PEAK)) {
        import_track_peak(metadata, peak, diagnostics);
    }
}

/// Write `metadata` into an APE tag
pub fn export_track_metadata_into_ape_tag(
    tag: &mut ApeTag,
    metadata: &TrackMetadata,
    diagnostics: &mut Diagnostics,
) -> Result<()> {
    export_common_fields(
        tag,
        metadata,
        WriteOptions::OMIT_YEAR | WriteOptions::OMIT_TRACK_NUMBER,
        diagnostics,
    );

    let track = join_strings(
        metadata.track_number.as_deref().unwrap_or_default(),
        metadata.track_total.as_deref().unwrap_or_default(),
    );
    set_text(tag, TRACK, &track)?;
    set_text(tag, YEAR, metadata.year.as_deref().unwrap_or_default())?;

    set_text(
        tag,
        ALBUM_ARTIST,
        metadata.album_artist.as_deref().unwrap_or_default(),
    )?;
    set_text(tag, COMPOSER, metadata.composer.as_deref().unwrap_or_default())?;
    set_text(tag, GROUPING, metadata.grouping.as_deref().unwrap_or_default())?;

    set_text(tag, BPM, &format_bpm(metadata.bpm))?;
    set_text(
        tag,
        REPLAYGAIN_TRACK_GAIN,
        &format_gain_db(metadata.replay_gain.gain_db),
    )?;
    set_text(
        tag,
        REPLAYGAIN_TRACK_PEAK,
        &format_peak(metadata.replay_gain.peak),
    )?;

    Ok(())
}
