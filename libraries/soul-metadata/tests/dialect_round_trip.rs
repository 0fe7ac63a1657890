//! Property-based round trips through every tag dialect
//!
//! Exporting canonical metadata into an empty tag and importing it again
//! must reproduce every field the dialect supports natively. Lossy fields
//! are cleared from the expected value per dialect.

use lofty::ape::ApeTag;
use lofty::id3::v2::Id3v2Tag;
use lofty::iff::wav::RIFFInfoList;
use lofty::mp4::Ilst;
use lofty::ogg::VorbisComments;
use lofty::TagExt;
use proptest::prelude::*;
use soul_core::{Bpm, ReplayGain, TrackMetadata};
use soul_metadata::{DialectAdapter, Diagnostics};

// ===== Helpers =====

fn text() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ]{0,19}"
}

// Two and three letter genres collide with ID3v1 genre references
fn genre() -> impl Strategy<Value = String> {
    "[A-Za-z]{4,12}"
}

fn iso_date() -> impl Strategy<Value = String> {
    (1900i32..2100, 1u32..=12, 1u32..=28)
        .prop_map(|(year, month, day)| format!("{year:04}-{month:02}-{day:02}"))
}

fn positive_number() -> impl Strategy<Value = String> {
    (1u32..100).prop_map(|value| value.to_string())
}

fn gain_db() -> impl Strategy<Value = f64> {
    (-2000i32..2000)
        .prop_filter("0 dB means undefined", |centi_db| *centi_db != 0)
        .prop_map(|centi_db| f64::from(centi_db) / 100.0)
}

fn peak() -> impl Strategy<Value = f64> {
    (0u32..200).prop_map(|centi| f64::from(centi) / 100.0)
}

fn fractional_bpm() -> impl Strategy<Value = Bpm> {
    (600u32..2500).prop_filter_map("valid tempo", |deci_bpm| Bpm::new(f64::from(deci_bpm) / 10.0))
}

fn integer_bpm() -> impl Strategy<Value = Bpm> {
    (60u32..250).prop_filter_map("valid tempo", |bpm| Bpm::new(f64::from(bpm)))
}

fn metadata_with(bpm: impl Strategy<Value = Bpm>) -> impl Strategy<Value = TrackMetadata> {
    (
        (text(), text(), text(), text(), text(), text()),
        (genre(), text(), iso_date()),
        (positive_number(), positive_number()),
        (bpm, gain_db(), peak()),
        "[A-G][#b]?m?",
    )
        .prop_map(
            |(
                (title, artist, album, album_artist, composer, grouping),
                (genre, comment, year),
                (track_number, track_total),
                (bpm, gain_db, peak),
                key,
            )| TrackMetadata {
                title: Some(title),
                artist: Some(artist),
                album: Some(album),
                album_artist: Some(album_artist),
                composer: Some(composer),
                grouping: Some(grouping),
                genre: Some(genre),
                comment: Some(comment),
                year: Some(year),
                track_number: Some(track_number),
                track_total: Some(track_total),
                bpm: Some(bpm),
                replay_gain: ReplayGain::new(Some(gain_db), Some(peak)),
                key: Some(key),
                ..TrackMetadata::default()
            },
        )
}

fn round_trip<T: DialectAdapter>(mut tag: T, metadata: &TrackMetadata) -> TrackMetadata {
    let mut diagnostics = Diagnostics::new();
    tag.export_from(metadata, &mut diagnostics)
        .expect("export into an empty tag");
    let mut imported = TrackMetadata::new();
    tag.import_into(&mut imported, &mut diagnostics);
    assert!(
        diagnostics.is_empty(),
        "unexpected diagnostics: {:?}",
        diagnostics.events()
    );
    imported
}

// ===== Property Tests =====

proptest! {
    /// Property: ID3v2.4 preserves everything except fractional BPM
    #[test]
    fn id3v24_round_trip(metadata in metadata_with(integer_bpm())) {
        let imported = round_trip(Id3v2Tag::new(), &metadata);
        prop_assert_eq!(imported, metadata);
    }

    /// Property: ID3v2 truncates the BPM to an integer
    #[test]
    fn id3v2_truncates_bpm(metadata in metadata_with(fractional_bpm())) {
        let imported = round_trip(Id3v2Tag::new(), &metadata);
        let expected = metadata.bpm.and_then(|bpm| Bpm::new(f64::from(bpm.to_integer())));
        prop_assert_eq!(imported.bpm, expected);
    }

    /// Property: APE preserves everything except the key
    #[test]
    fn ape_round_trip(metadata in metadata_with(fractional_bpm())) {
        let imported = round_trip(ApeTag::new(), &metadata);
        let expected = TrackMetadata { key: None, ..metadata };
        prop_assert_eq!(imported, expected);
    }

    /// Property: Vorbis Comments preserve everything
    #[test]
    fn vorbis_comment_round_trip(metadata in metadata_with(fractional_bpm())) {
        let imported = round_trip(VorbisComments::new(), &metadata);
        prop_assert_eq!(imported, metadata);
    }

    /// Property: MP4 preserves everything
    #[test]
    fn mp4_round_trip(metadata in metadata_with(fractional_bpm())) {
        let imported = round_trip(Ilst::new(), &metadata);
        prop_assert_eq!(imported, metadata);
    }

    /// Property: RIFF INFO keeps only the generic fields
    #[test]
    fn riff_info_round_trip(metadata in metadata_with(fractional_bpm())) {
        let imported = round_trip(RIFFInfoList::new(), &metadata);
        let expected = TrackMetadata {
            album_artist: None,
            composer: None,
            grouping: None,
            track_total: None,
            bpm: None,
            replay_gain: ReplayGain::default(),
            key: None,
            ..metadata
        };
        prop_assert_eq!(imported, expected);
    }

    /// Property: exporting twice yields the same tag
    #[test]
    fn export_is_idempotent(metadata in metadata_with(fractional_bpm())) {
        let mut once = VorbisComments::new();
        once.export_from(&metadata, &mut Diagnostics::new()).unwrap();
        let mut twice = once.clone();
        twice.export_from(&metadata, &mut Diagnostics::new()).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// Property: undefined fields leave nothing behind
    #[test]
    fn exporting_empty_metadata_clears_the_tag(metadata in metadata_with(integer_bpm())) {
        let mut tag = Ilst::new();
        tag.export_from(&metadata, &mut Diagnostics::new()).unwrap();
        tag.export_from(&TrackMetadata::new(), &mut Diagnostics::new()).unwrap();
        prop_assert!(tag.is_empty());
    }
}
