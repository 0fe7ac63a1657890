/// Generic fields shared by all dialects
use super::WriteOptions;
use crate::diagnostics::{Diagnostic, Diagnostics, TagField};
use crate::normalize::{calendar_year, TrackNumbers, TrackNumbersParse};
use lofty::Accessor;
use soul_core::TrackMetadata;

/// Read the generic baseline fields
///
/// Year and track number only carry integers here. Dialect adapters
/// overwrite them afterwards with their more precise text fields.
pub fn import_common_fields<T>(tag: &T, metadata: &mut TrackMetadata)
where
    T: Accessor + ?Sized,
{
    if let Some(title) = tag.title() {
        metadata.title = Some(title.into_owned());
    }
    if let Some(artist) = tag.artist() {
        metadata.artist = Some(artist.into_owned());
    }
    if let Some(album) = tag.album() {
        metadata.album = Some(album.into_owned());
    }
    if let Some(comment) = tag.comment() {
        metadata.comment = Some(comment.into_owned());
    }
    if let Some(genre) = tag.genre() {
        metadata.genre = Some(genre.into_owned());
    }
    if let Some(year) = tag.year() {
        metadata.year = Some(year.to_string());
    }
    if let Some(track) = tag.track() {
        metadata.track_number = Some(track.to_string());
    }
}

/// Write the generic baseline fields
///
/// Fields listed in `options` are skipped, because the calling dialect
/// writes them through its own path. A year without a recognizable
/// calendar year is reported and the previous value is kept.
pub fn export_common_fields<T>(
    tag: &mut T,
    metadata: &TrackMetadata,
    options: WriteOptions,
    diagnostics: &mut Diagnostics,
) where
    T: Accessor + ?Sized,
{
    write_text(tag, metadata.title.as_deref(), T::set_title, T::remove_title);
    write_text(tag, metadata.artist.as_deref(), T::set_artist, T::remove_artist);
    write_text(tag, metadata.album.as_deref(), T::set_album, T::remove_album);
    write_text(tag, metadata.genre.as_deref(), T::set_genre, T::remove_genre);

    if !options.contains(WriteOptions::OMIT_COMMENT) {
        write_text(tag, metadata.comment.as_deref(), T::set_comment, T::remove_comment);
    }

    if !options.contains(WriteOptions::OMIT_YEAR) {
        match numeric_text(metadata.year.as_deref()) {
            None => tag.remove_year(),
            Some(text) => match calendar_year(text).and_then(|year| u32::try_from(year).ok()) {
                Some(year) => tag.set_year(year),
                None => diagnostics.push(Diagnostic::MalformedValue {
                    field: TagField::Year,
                    value: text.to_string(),
                }),
            },
        }
    }

    if !options.contains(WriteOptions::OMIT_TRACK_NUMBER) {
        let number = metadata.track_number.as_deref().unwrap_or_default();
        match TrackNumbers::parse(number) {
            TrackNumbersParse::Empty => tag.remove_track(),
            TrackNumbersParse::Valid(numbers) => match numbers.actual {
                Some(actual) => tag.set_track(actual),
                None => tag.remove_track(),
            },
            TrackNumbersParse::Invalid => diagnostics.push(Diagnostic::InvalidTrackNumbers {
                value: number.to_string(),
            }),
        }
    }
}

/// Set a text field, an empty value removes it
fn write_text<T>(
    tag: &mut T,
    value: Option<&str>,
    set: fn(&mut T, String),
    remove: fn(&mut T),
) where
    T: Accessor + ?Sized,
{
    match value.filter(|value| !value.is_empty()) {
        Some(value) => set(tag, value.to_string()),
        None => remove(tag),
    }
}

/// Value of a numeric field, `None` if missing or blank
pub(crate) fn numeric_text(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}

/// Store one part of a split "number/total" value, empty parts are absent
pub(crate) fn split_part(part: &str) -> Option<String> {
    (!part.is_empty()).then(|| part.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lofty::iff::wav::RIFFInfoList;

    fn metadata() -> TrackMetadata {
        TrackMetadata {
            title: Some("Title".to_string()),
            artist: Some("Artist".to_string()),
            album: Some("Album".to_string()),
            genre: Some("Genre".to_string()),
            comment: Some("Comment".to_string()),
            year: Some("2020-05-01".to_string()),
            track_number: Some("3".to_string()),
            ..TrackMetadata::default()
        }
    }

    #[test]
    fn generic_year_and_track_are_integers() {
        let mut tag = RIFFInfoList::new();
        let mut diagnostics = Diagnostics::new();
        export_common_fields(&mut tag, &metadata(), WriteOptions::empty(), &mut diagnostics);

        let mut imported = TrackMetadata::new();
        import_common_fields(&tag, &mut imported);

        assert_eq!(imported.title.as_deref(), Some("Title"));
        assert_eq!(imported.comment.as_deref(), Some("Comment"));
        assert_eq!(imported.year.as_deref(), Some("2020"));
        assert_eq!(imported.track_number.as_deref(), Some("3"));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn omitted_fields_are_not_touched() {
        let mut tag = RIFFInfoList::new();
        tag.set_comment("Keep".to_string());
        tag.set_year(1999);

        let options = WriteOptions::OMIT_COMMENT | WriteOptions::OMIT_YEAR;
        export_common_fields(&mut tag, &metadata(), options, &mut Diagnostics::new());

        assert_eq!(tag.comment().as_deref(), Some("Keep"));
        assert_eq!(tag.year(), Some(1999));
    }

    #[test]
    fn undefined_fields_are_removed() {
        let mut tag = RIFFInfoList::new();
        export_common_fields(&mut tag, &metadata(), WriteOptions::empty(), &mut Diagnostics::new());

        export_common_fields(
            &mut tag,
            &TrackMetadata::new(),
            WriteOptions::empty(),
            &mut Diagnostics::new(),
        );
        assert_eq!(tag.title(), None);
        assert_eq!(tag.year(), None);
        assert_eq!(tag.track(), None);
    }

    #[test]
    fn malformed_year_keeps_previous_value() {
        let mut tag = RIFFInfoList::new();
        tag.set_year(1999);

        let mut metadata = metadata();
        metadata.year = Some("sometime".to_string());
        let mut diagnostics = Diagnostics::new();
        export_common_fields(&mut tag, &metadata, WriteOptions::empty(), &mut diagnostics);

        assert_eq!(tag.year(), Some(1999));
        assert_eq!(
            diagnostics.events(),
            [Diagnostic::MalformedValue {
                field: TagField::Year,
                value: "sometime".to_string()
            }]
        );

        metadata.year = Some(" ".to_string());
        export_common_fields(&mut tag, &metadata, WriteOptions::empty(), &mut diagnostics);
        assert_eq!(tag.year(), None);
    }

    #[test]
    fn invalid_track_number_is_reported_and_skipped() {
        let mut tag = RIFFInfoList::new();
        tag.set_track(5);

        let mut metadata = metadata();
        metadata.track_number = Some("abc".to_string());
        let mut diagnostics = Diagnostics::new();
        export_common_fields(&mut tag, &metadata, WriteOptions::empty(), &mut diagnostics);

        assert_eq!(tag.track(), Some(5));
        assert_eq!(
            diagnostics.events(),
            [Diagnostic::InvalidTrackNumbers {
                value: "abc".to_string()
            }]
        );
    }

    #[test]
    fn missing_fields_leave_metadata_untouched() {
        let mut metadata = metadata();
        import_common_fields(&RIFFInfoList::new(), &mut metadata);
        assert_eq!(metadata.title.as_deref(), Some("Title"));
    }
}
