/// Vorbis Comment adapter
///
/// Many concepts have competing field names. Reading walks the names in the
/// order listed below, writing targets the first name and only updates the
/// alternatives that already exist.
use super::common::{export_common_fields, import_common_fields, numeric_text, split_part};
use super::WriteOptions;
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::normalize::{
    format_bpm, format_gain_db, format_peak, import_track_gain, import_track_peak, parse_bpm,
    split_combined,
};
use crate::resolve::{find_first_non_empty, first_non_empty_value, keys_match};
use lofty::ogg::VorbisComments;
use soul_core::TrackMetadata;

/// Some applications (e.g. puddletag up to 1.0.5) write COMMENT
const COMMENT: [&str; 2] = ["DESCRIPTION", "COMMENT"];
const ALBUM_ARTIST: [&str; 4] = ["ALBUMARTIST", "ALBUM_ARTIST", "ALBUM ARTIST", "ENSEMBLE"];
const TRACK_TOTAL: [&str; 2] = ["TRACKTOTAL", "TOTALTRACKS"];
const BPM: [&str; 2] = ["TEMPO", "BPM"];
/// There is no standard, Rapid Evolution writes either of these
const KEY: [&str; 2] = ["INITIALKEY", "KEY"];

const COMPOSER: &str = "COMPOSER";
const GROUPING: &str = "GROUPING";
const DATE: &str = "DATE";
const TRACK_NUMBER: &str = "TRACKNUMBER";
const REPLAYGAIN_TRACK_GAIN: &str = "REPLAYGAIN_TRACK_GAIN";
const REPLAYGAIN_TRACK_PEAK: &str = "REPLAYGAIN_TRACK_PEAK";

/// First non-empty value of a field, or `None` if the field is missing
fn get<'a>(tag: &'a VorbisComments, key: &str) -> Option<&'a str> {
    let mut values = tag
        .items()
        .filter(|(name, _)| keys_match(name, key))
        .map(|(_, value)| value)
        .peekable();
    values.peek()?;
    Some(first_non_empty_value(values))
}

fn contains(tag: &VorbisComments, key: &str) -> bool {
    tag.items().any(|(name, _)| keys_match(name, key))
}

/// Replace all values of a field, an empty value removes it
fn set(tag: &mut VorbisComments, key: &str, value: &str) {
    if value.is_empty() {
        let _ = tag.remove(key);
    } else {
        tag.insert(key.to_string(), value.to_string());
    }
}

fn read_field<'a>(tag: &'a VorbisComments, keys: &[&str]) -> Option<&'a str> {
    find_first_non_empty(keys, |key| get(tag, key))
}

/// Write the preferred field and update existing alternatives
fn write_field(tag: &mut VorbisComments, keys: &[&str], value: &str) {
    let Some((preferred, alternatives)) = keys.split_first() else {
        return;
    };
    set(tag, preferred, value);
    for alternative in alternatives {
        if contains(tag, alternative) {
            set(tag, alternative, value);
        }
    }
}

/// Read Vorbis Comments into `metadata`
pub fn import_track_metadata_from_vorbis_comment_tag(
    metadata: &mut TrackMetadata,
    tag: &VorbisComments,
    diagnostics: &mut Diagnostics,
) {
    import_common_fields(tag, metadata);

    if let Some(comment) = read_field(tag, &COMMENT) {
        metadata.comment = Some(comment.to_string());
    }
    if let Some(album_artist) = read_field(tag, &ALBUM_ARTIST) {
        metadata.album_artist = Some(album_artist.to_string());
    }
    if let Some(composer) = get(tag, COMPOSER) {
        metadata.composer = Some(composer.to_string());
    }
    if let Some(grouping) = get(tag, GROUPING) {
        metadata.grouping = Some(grouping.to_string());
    }

    // TRACKNUMBER might contain "number/total" although this is not
    // recommended, so it is always split
    if let Some(track) = get(tag, TRACK_NUMBER) {
        let (number, total) = split_combined(track);
        metadata.track_number = split_part(number);
        metadata.track_total = split_part(total);
    }
    if let Some(total) = read_field(tag, &TRACK_TOTAL) {
        metadata.track_total = split_part(total.trim());
    }

    // ISO 8601, optionally followed by arbitrary text
    if let Some(date) = get(tag, DATE) {
        metadata.year = Some(date.to_string());
    }

    if let Some(bpm) = numeric_text(read_field(tag, &BPM)) {
        if let Some(bpm) = parse_bpm(bpm) {
            metadata.bpm = Some(bpm);
        }
    }

    if let Some(gain) = numeric_text(get(tag, REPLAYGAIN_TRACK_GAIN)) {
        import_track_gain(metadata, gain, diagnostics);
    }
    if let Some(peak) = numeric_text(get(tag, REPLAYGAIN_TRACK_PEAK)) {
        import_track_peak(metadata, peak, diagnostics);
    }

    if let Some(key) = read_field(tag, &KEY) {
        metadata.key = Some(key.to_string());
    }
}

/// Write `metadata` into Vorbis Comments
pub fn export_track_metadata_into_vorbis_comment_tag(
    tag: &mut VorbisComments,
    metadata: &TrackMetadata,
    diagnostics: &mut Diagnostics,
) -> Result<()> {
    export_common_fields(
        tag,
        metadata,
        WriteOptions::OMIT_COMMENT | WriteOptions::OMIT_YEAR | WriteOptions::OMIT_TRACK_NUMBER,
        diagnostics,
    );

    write_field(
        tag,
        &COMMENT,
        metadata.comment.as_deref().unwrap_or_default(),
    );

    set(tag, DATE, metadata.year.as_deref().unwrap_or_default());
    set(tag, COMPOSER, metadata.composer.as_deref().unwrap_or_default());
    set(tag, GROUPING, metadata.grouping.as_deref().unwrap_or_default());
    set(
        tag,
        TRACK_NUMBER,
        metadata.track_number.as_deref().unwrap_or_default(),
    );
    set(
        tag,
        REPLAYGAIN_TRACK_GAIN,
        &format_gain_db(metadata.replay_gain.gain_db),
    );
    set(
        tag,
        REPLAYGAIN_TRACK_PEAK,
        &format_peak(metadata.replay_gain.peak),
    );

    write_field(
        tag,
        &TRACK_TOTAL,
        metadata.track_total.as_deref().unwrap_or_default(),
    );
    write_field(
        tag,
        &ALBUM_ARTIST,
        metadata.album_artist.as_deref().unwrap_or_default(),
    );
    write_field(tag, &BPM, &format_bpm(metadata.bpm));
    write_field(tag, &KEY, metadata.key.as_deref().unwrap_or_default());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag_with(fields: &[(&str, &str)]) -> VorbisComments {
        let mut tag = VorbisComments::new();
        for (key, value) in fields {
            tag.push(key.to_string(), value.to_string());
        }
        tag
    }

    fn import(tag: &VorbisComments) -> TrackMetadata {
        let mut metadata = TrackMetadata::new();
        import_track_metadata_from_vorbis_comment_tag(&mut metadata, tag, &mut Diagnostics::new());
        metadata
    }

    #[test]
    fn track_number_is_split_and_total_overrides() {
        let mut tag = tag_with(&[("TRACKNUMBER", "3/12")]);
        let metadata = import(&tag);
        assert_eq!(metadata.track_number.as_deref(), Some("3"));
        assert_eq!(metadata.track_total.as_deref(), Some("12"));

        tag.push("TOTALTRACKS".to_string(), "14".to_string());
        let metadata = import(&tag);
        assert_eq!(metadata.track_number.as_deref(), Some("3"));
        assert_eq!(metadata.track_total.as_deref(), Some("14"));
    }

    #[test]
    fn album_artist_alternatives() {
        for key in ALBUM_ARTIST {
            let tag = tag_with(&[(key, "Various Artists")]);
            assert_eq!(
                import(&tag).album_artist.as_deref(),
                Some("Various Artists"),
                "{key}"
            );
        }
    }

    #[test]
    fn non_empty_alternative_wins() {
        let tag = tag_with(&[("ALBUMARTIST", ""), ("ENSEMBLE", "Orchestra")]);
        assert_eq!(import(&tag).album_artist.as_deref(), Some("Orchestra"));
    }

    #[test]
    fn first_non_empty_duplicate_wins() {
        let tag = tag_with(&[("composer", ""), ("COMPOSER", "Bach"), ("Composer", "Händel")]);
        assert_eq!(import(&tag).composer.as_deref(), Some("Bach"));
    }

    #[test]
    fn comment_falls_back_to_comment_field() {
        let mut tag = tag_with(&[("COMMENT", "old style")]);
        assert_eq!(import(&tag).comment.as_deref(), Some("old style"));

        tag.push("DESCRIPTION".to_string(), "new style".to_string());
        assert_eq!(import(&tag).comment.as_deref(), Some("new style"));
    }

    #[test]
    fn export_updates_only_existing_alternatives() {
        let mut tag = tag_with(&[("BPM", "120"), ("KEY", "C")]);

        let mut metadata = TrackMetadata::new();
        metadata.bpm = soul_core::Bpm::new(128.5);
        metadata.key = Some("Am".to_string());
        metadata.album_artist = Some("Someone".to_string());
        export_track_metadata_into_vorbis_comment_tag(&mut tag, &metadata, &mut Diagnostics::new())
            .unwrap();

        assert_eq!(tag.get("TEMPO"), Some("128.5"));
        assert_eq!(tag.get("BPM"), Some("128.5"));
        assert_eq!(tag.get("INITIALKEY"), Some("Am"));
        assert_eq!(tag.get("KEY"), Some("Am"));
        assert_eq!(tag.get("ALBUMARTIST"), Some("Someone"));
        assert_eq!(tag.get("ALBUM_ARTIST"), None);
        assert_eq!(tag.get("ENSEMBLE"), None);
    }

    #[test]
    fn undefined_fields_are_removed() {
        let mut tag = tag_with(&[("DATE", "2001"), ("TEMPO", "120"), ("COMMENT", "old")]);
        export_track_metadata_into_vorbis_comment_tag(
            &mut tag,
            &TrackMetadata::new(),
            &mut Diagnostics::new(),
        )
        .unwrap();
        assert_eq!(tag.items().len(), 0);
    }

    #[test]
    fn date_keeps_trailing_text() {
        let tag = tag_with(&[("DATE", "2001-02-03 remastered")]);
        assert_eq!(import(&tag).year.as_deref(), Some("2001-02-03 remastered"));
    }
}
