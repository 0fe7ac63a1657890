/// MP4 adapter
///
/// Track number and total share the `trkn` integer pair. The tempo is
/// stored twice: as a float in a freeform iTunes atom and truncated in the
/// 16-bit `tmpo` atom. The float slot wins when reading.
use super::common::{export_common_fields, import_common_fields, numeric_text};
use super::WriteOptions;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::Result;
use crate::normalize::{
    format_bpm, format_gain_db, format_peak, import_track_gain, import_track_peak,
    join_strings, parse_bpm, TrackNumbers, TrackNumbersParse,
};
use crate::resolve::{find_first_non_empty, first_non_empty_value, keys_match};
use lofty::mp4::{Atom, AtomData, AtomIdent, Ilst};
use lofty::Accessor;
use soul_core::{Bpm, TrackMetadata};
use std::borrow::Cow;

const ALBUM_ARTIST: AtomIdent<'static> = AtomIdent::Fourcc(*b"aART");
const COMPOSER: AtomIdent<'static> = AtomIdent::Fourcc(*b"\xa9wrt");
const GROUPING: AtomIdent<'static> = AtomIdent::Fourcc(*b"\xa9grp");
const YEAR: AtomIdent<'static> = AtomIdent::Fourcc(*b"\xa9day");
const TRACK: AtomIdent<'static> = AtomIdent::Fourcc(*b"trkn");
const TEMPO: AtomIdent<'static> = AtomIdent::Fourcc(*b"tmpo");
const BPM: AtomIdent<'static> = itunes("BPM");
const REPLAYGAIN_TRACK_GAIN: AtomIdent<'static> = itunes("replaygain_track_gain");
const REPLAYGAIN_TRACK_PEAK: AtomIdent<'static> = itunes("replaygain_track_peak");
/// MixedInKey, Serato and Traktor write `initialkey`, Rapid Evolution `KEY`
const KEY: [&str; 2] = ["initialkey", "KEY"];

const ITUNES_MEAN: &str = "com.apple.iTunes";

/// Data type code of a big-endian signed integer
const SIGNED_INTEGER_CODE: u32 = 21;
/// Data type code of implicitly typed binary data such as `trkn`
const IMPLICIT_CODE: u32 = 0;

const fn itunes(name: &str) -> AtomIdent<'_> {
    AtomIdent::Freeform {
        mean: Cow::Borrowed(ITUNES_MEAN),
        name: Cow::Borrowed(name),
    }
}

/// Fourcc codes match exactly, freeform names case-insensitively
fn idents_match(lhs: &AtomIdent<'_>, rhs: &AtomIdent<'_>) -> bool {
    match (lhs, rhs) {
        (
            AtomIdent::Freeform { mean, name },
            AtomIdent::Freeform {
                mean: other_mean,
                name: other_name,
            },
        ) => mean == other_mean && keys_match(name, other_name),
        _ => lhs == rhs,
    }
}

fn find<'a>(tag: &'a Ilst, ident: &AtomIdent<'_>) -> Option<&'a Atom<'static>> {
    tag.into_iter().find(|atom| idents_match(atom.ident(), ident))
}

fn contains(tag: &Ilst, ident: &AtomIdent<'_>) -> bool {
    find(tag, ident).is_some()
}

fn remove(tag: &mut Ilst, ident: &AtomIdent<'_>) {
    tag.retain(|atom| !idents_match(atom.ident(), ident));
}

/// First non-empty text value of an atom
fn text<'a>(tag: &'a Ilst, ident: &AtomIdent<'_>) -> Option<&'a str> {
    let mut values = find(tag, ident)?
        .data()
        .filter_map(|data| match data {
            AtomData::UTF8(text) | AtomData::UTF16(text) => Some(text.as_str()),
            _ => None,
        })
        .peekable();
    values.peek()?;
    Some(first_non_empty_value(values))
}

/// Write a text atom, an empty value removes it
fn set_text(tag: &mut Ilst, ident: AtomIdent<'static>, value: &str) {
    remove(tag, &ident);
    if !value.is_empty() {
        tag.replace_atom(Atom::new(ident, AtomData::UTF8(value.to_string())));
    }
}

/// Integer tempo of the `tmpo` atom
fn tempo(tag: &Ilst) -> Option<u32> {
    match find(tag, &TEMPO)?.data().next()? {
        AtomData::SignedInteger(value) => u32::try_from(*value).ok(),
        AtomData::UnsignedInteger(value) => Some(*value),
        AtomData::Unknown { data, .. } => match data.as_slice() {
            [high, low] => Some(u32::from(u16::from_be_bytes([*high, *low]))),
            _ => None,
        },
        _ => None,
    }
}

fn set_tempo(tag: &mut Ilst, bpm: Bpm) {
    let tempo = u16::try_from(bpm.to_integer()).unwrap_or(u16::MAX);
    tag.replace_atom(Atom::new(
        TEMPO,
        AtomData::Unknown {
            code: SIGNED_INTEGER_CODE,
            data: tempo.to_be_bytes().to_vec(),
        },
    ));
}

/// Raw `trkn` pair, 0 means undefined
fn track_pair(tag: &Ilst) -> Option<(u32, u32)> {
    Some((tag.track()?, tag.track_total()?))
}

fn set_track_pair(tag: &mut Ilst, number: u16, total: u16) {
    let [number_high, number_low] = number.to_be_bytes();
    let [total_high, total_low] = total.to_be_bytes();
    tag.replace_atom(Atom::new(
        TRACK,
        AtomData::Unknown {
            code: IMPLICIT_CODE,
            data: vec![0, 0, number_high, number_low, total_high, total_low, 0, 0],
        },
    ));
}

/// Read an MP4 item list into `metadata`
pub fn import_track_metadata_from_mp4_tag(
    metadata: &mut TrackMetadata,
    tag: &Ilst,
    diagnostics: &mut Diagnostics,
) {
    import_common_fields(tag, metadata);

    if let Some(album_artist) = text(tag, &ALBUM_ARTIST) {
        metadata.album_artist = Some(album_artist.to_string());
    }
    if let Some(composer) = text(tag, &COMPOSER) {
        metadata.composer = Some(composer.to_string());
    }
    if let Some(grouping) = text(tag, &GROUPING) {
        metadata.grouping = Some(grouping.to_string());
    }
    if let Some(year) = text(tag, &YEAR) {
        metadata.year = Some(year.to_string());
    }

    if let Some((number, total)) = track_pair(tag) {
        let (number, total) = TrackNumbers::from_integers(number, total).to_strings();
        metadata.track_number = number;
        metadata.track_total = total;
    }

    if contains(tag, &BPM) {
        if let Some(bpm) = numeric_text(text(tag, &BPM)).and_then(parse_bpm) {
            metadata.bpm = Some(bpm);
        }
    } else if let Some(tempo) = tempo(tag) {
        if let Some(bpm) = Bpm::new(f64::from(tempo)) {
            metadata.bpm = Some(bpm);
        }
    }

    if let Some(gain) = numeric_text(text(tag, &REPLAYGAIN_TRACK_GAIN)) {
        import_track_gain(metadata, gain, diagnostics);
    }
    if let Some(peak) = numeric_text(text(tag, &REPLAYGAIN_TRACK_PEAK)) {
        import_track_peak(metadata, peak, diagnostics);
    }

    if let Some(key) = find_first_non_empty(&KEY, |name| text(tag, &itunes(name))) {
        metadata.key = Some(key.to_string());
    }
}

/// Write `metadata` into an MP4 item list
pub fn export_track_metadata_into_mp4_tag(
    tag: &mut Ilst,
    metadata: &TrackMetadata,
    diagnostics: &mut Diagnostics,
) -> Result<()> {
    export_common_fields(
        tag,
        metadata,
        WriteOptions::OMIT_YEAR | WriteOptions::OMIT_TRACK_NUMBER,
        diagnostics,
    );

    let number = metadata.track_number.as_deref().unwrap_or_default();
    let total = metadata.track_total.as_deref().unwrap_or_default();
    match TrackNumbers::parse_from_strings(number, total) {
        TrackNumbersParse::Empty => remove(tag, &TRACK),
        TrackNumbersParse::Valid(numbers) => {
            let pair = (
                u16::try_from(numbers.actual.unwrap_or(0)),
                u16::try_from(numbers.total.unwrap_or(0)),
            );
            match pair {
                (Ok(actual), Ok(count)) => set_track_pair(tag, actual, count),
                _ => diagnostics.push(Diagnostic::InvalidTrackNumbers {
                    value: join_strings(number, total),
                }),
            }
        }
        TrackNumbersParse::Invalid => diagnostics.push(Diagnostic::InvalidTrackNumbers {
            value: join_strings(number, total),
        }),
    }

    set_text(tag, YEAR, metadata.year.as_deref().unwrap_or_default());
    set_text(
        tag,
        ALBUM_ARTIST,
        metadata.album_artist.as_deref().unwrap_or_default(),
    );
    set_text(tag, COMPOSER, metadata.composer.as_deref().unwrap_or_default());
    set_text(tag, GROUPING, metadata.grouping.as_deref().unwrap_or_default());

    match metadata.bpm {
        Some(bpm) => set_tempo(tag, bpm),
        None => remove(tag, &TEMPO),
    }
    set_text(tag, BPM, &format_bpm(metadata.bpm));

    set_text(
        tag,
        REPLAYGAIN_TRACK_GAIN,
        &format_gain_db(metadata.replay_gain.gain_db),
    );
    set_text(
        tag,
        REPLAYGAIN_TRACK_PEAK,
        &format_peak(metadata.replay_gain.peak),
    );

    let key = metadata.key.as_deref().unwrap_or_default();
    let [preferred, alternative] = KEY;
    set_text(tag, itunes(preferred), key);
    if contains(tag, &itunes(alternative)) {
        set_text(tag, itunes(alternative), key);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lofty::TagExt;

    fn import(tag: &Ilst) -> TrackMetadata {
        let mut metadata = TrackMetadata::new();
        import_track_metadata_from_mp4_tag(&mut metadata, tag, &mut Diagnostics::new());
        metadata
    }

    fn export(tag: &mut Ilst, metadata: &TrackMetadata) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        export_track_metadata_into_mp4_tag(tag, metadata, &mut diagnostics).unwrap();
        diagnostics
    }

    #[test]
    fn float_bpm_is_preferred_over_tmpo() {
        let mut tag = Ilst::new();
        tag.replace_atom(Atom::new(TEMPO, AtomData::SignedInteger(128)));
        assert_eq!(import(&tag).bpm, Bpm::new(128.0));

        set_text(&mut tag, BPM, "127.5");
        assert_eq!(import(&tag).bpm, Bpm::new(127.5));
    }

    #[test]
    fn both_bpm_slots_are_written() {
        let mut metadata = TrackMetadata::new();
        metadata.bpm = Bpm::new(127.5);

        let mut tag = Ilst::new();
        export(&mut tag, &metadata);
        assert_eq!(tempo(&tag), Some(127));
        assert_eq!(
            find(&tag, &TEMPO).and_then(|atom| atom.data().next()),
            Some(&AtomData::Unknown {
                code: SIGNED_INTEGER_CODE,
                data: vec![0, 127]
            })
        );
        assert_eq!(text(&tag, &BPM), Some("127.5"));

        export(&mut tag, &TrackMetadata::new());
        assert!(tag.is_empty());
    }

    #[test]
    fn track_numbers_use_integer_pair() {
        let mut metadata = TrackMetadata::new();
        metadata.track_number = Some("3".to_string());
        metadata.track_total = Some("12".to_string());

        let mut tag = Ilst::new();
        export(&mut tag, &metadata);
        assert_eq!(track_pair(&tag), Some((3, 12)));

        let imported = import(&tag);
        assert_eq!(imported.track_number.as_deref(), Some("3"));
        assert_eq!(imported.track_total.as_deref(), Some("12"));
    }

    #[test]
    fn invalid_track_numbers_are_skipped() {
        let mut tag = Ilst::new();
        set_track_pair(&mut tag, 1, 10);

        let mut metadata = TrackMetadata::new();
        metadata.track_number = Some("abc".to_string());
        let diagnostics = export(&mut tag, &metadata);

        assert_eq!(track_pair(&tag), Some((1, 10)));
        assert_eq!(
            diagnostics.events(),
            [Diagnostic::InvalidTrackNumbers {
                value: "abc".to_string()
            }]
        );

        metadata.track_number = Some("70000".to_string());
        let diagnostics = export(&mut tag, &metadata);
        assert_eq!(track_pair(&tag), Some((1, 10)));
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn freeform_names_match_case_insensitively() {
        let mut tag = Ilst::new();
        tag.replace_atom(Atom::new(
            itunes("REPLAYGAIN_TRACK_GAIN"),
            AtomData::UTF8("-6.5 dB".to_string()),
        ));
        assert_eq!(import(&tag).replay_gain.gain_db, Some(-6.5));

        export(&mut tag, &TrackMetadata::new());
        assert!(tag.is_empty());
    }

    #[test]
    fn key_alternative_is_read_and_updated() {
        let mut tag = Ilst::new();
        set_text(&mut tag, itunes("KEY"), "8A");
        assert_eq!(import(&tag).key.as_deref(), Some("8A"));

        let mut metadata = TrackMetadata::new();
        metadata.key = Some("9A".to_string());
        export(&mut tag, &metadata);
        assert_eq!(text(&tag, &itunes("initialkey")), Some("9A"));
        assert_eq!(text(&tag, &itunes("KEY")), Some("9A"));
    }
}
