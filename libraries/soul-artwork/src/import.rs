//! Cover art selection per tag dialect
//!
//! Every dialect follows the same rule: walk the preferred picture types in
//! order and take the first picture of that type that decodes. Without a
//! match the first decodable picture of any type wins. Legacy storage is
//! only consulted if the regular picture slot yields nothing.

use crate::decoder::ImageDecoder;
use crate::error::Result;
use crate::types::ArtworkData;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use lofty::ape::ApeTag;
use lofty::id3::v2::{AttachedPictureFrame, FrameValue, Id3v2Tag};
use lofty::mp4::Ilst;
use lofty::ogg::{OggPictureStorage, VorbisComments};
use lofty::{ItemValue, MimeType, ParsingMode, Picture, PictureType};
use soul_metadata::DialectTag;
use tracing::{debug, warn};

/// Picture types that qualify as cover art, by priority
pub const PREFERRED_PICTURE_TYPES: [PictureType; 4] = [
    PictureType::CoverFront,
    PictureType::Media,
    PictureType::Illustration,
    PictureType::Other,
];

/// Base64-encoded FLAC picture blocks, written by older taggers
const METADATA_BLOCK_PICTURE: &str = "METADATA_BLOCK_PICTURE";
/// Unofficial and deprecated field holding a bare base64 image
const COVERART: &str = "COVERART";

const APE_COVER_ART_PREFIX: &str = "Cover Art (";

/// APE keys of the picture types that qualify as cover art
const APE_PICTURE_KEYS: [(&str, PictureType); 5] = [
    ("Cover Art (Front)", PictureType::CoverFront),
    ("Cover Art (Back)", PictureType::CoverBack),
    ("Cover Art (Media)", PictureType::Media),
    ("Cover Art (Illustration)", PictureType::Illustration),
    ("Cover Art (Other)", PictureType::Other),
];

const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// A picture that may be selected as cover art
///
/// Pictures without a known type only take part in the fallback pass.
#[derive(Debug, Clone, Copy)]
struct Candidate<'a> {
    picture_type: Option<PictureType>,
    mime_type: Option<&'a MimeType>,
    data: &'a [u8],
}

impl<'a> Candidate<'a> {
    fn typed(picture: &'a Picture) -> Self {
        Self {
            picture_type: Some(picture.pic_type()),
            mime_type: picture.mime_type(),
            data: picture.data(),
        }
    }
}

fn decode_candidate<D>(candidate: &Candidate<'_>, decoder: &D) -> Option<ArtworkData>
where
    D: ImageDecoder + ?Sized,
{
    match decoder.decode(candidate.data, candidate.mime_type) {
        Ok(artwork) => Some(artwork),
        Err(e) => {
            warn!(
                "Failed to load image from picture of type {:?}: {}",
                candidate.picture_type, e
            );
            None
        }
    }
}

fn select_cover<D>(candidates: &[Candidate<'_>], decoder: &D) -> Option<ArtworkData>
where
    D: ImageDecoder + ?Sized,
{
    PREFERRED_PICTURE_TYPES
        .iter()
        .find_map(|preferred| {
            candidates
                .iter()
                .filter(|candidate| candidate.picture_type.as_ref() == Some(preferred))
                .find_map(|candidate| decode_candidate(candidate, decoder))
        })
        .or_else(|| {
            candidates
                .iter()
                .find_map(|candidate| decode_candidate(candidate, decoder))
        })
}

fn base64_decode(text: &str) -> Result<Vec<u8>> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    Ok(BASE64.decode(compact)?)
}

fn parse_picture_block(text: &str) -> Result<Picture> {
    let bytes = base64_decode(text)?;
    let (picture, _) = Picture::from_flac_bytes(&bytes, false, ParsingMode::Relaxed)?;
    Ok(picture)
}

/// Select the cover from the `APIC` frames of an ID3v2 tag
pub fn import_cover_image_from_id3v2_tag<D>(tag: &Id3v2Tag, decoder: &D) -> Option<ArtworkData>
where
    D: ImageDecoder + ?Sized,
{
    let candidates: Vec<_> = tag
        .into_iter()
        .filter_map(|frame| match frame.content() {
            FrameValue::Picture(AttachedPictureFrame { picture, .. }) => {
                Some(Candidate::typed(picture))
            }
            _ => None,
        })
        .collect();
    select_cover(&candidates, decoder)
}

/// Select the cover from the binary `Cover Art (…)` items of an APE tag
///
/// Each item holds a file name terminated by NUL, followed by the image.
pub fn import_cover_image_from_ape_tag<D>(tag: &ApeTag, decoder: &D) -> Option<ArtworkData>
where
    D: ImageDecoder + ?Sized,
{
    let candidates: Vec<_> = tag
        .into_iter()
        .filter_map(|item| {
            let key = item.key();
            if !key
                .get(..APE_COVER_ART_PREFIX.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(APE_COVER_ART_PREFIX))
            {
                return None;
            }
            let ItemValue::Binary(value) = item.value() else {
                return None;
            };
            let Some(separator) = value.iter().position(|byte| *byte == 0) else {
                debug!("APE item {key} lacks a file name");
                return None;
            };
            let picture_type = APE_PICTURE_KEYS
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(key))
                .map(|(_, picture_type)| *picture_type);
            Some(Candidate {
                picture_type,
                mime_type: None,
                data: &value[separator + 1..],
            })
        })
        .collect();
    select_cover(&candidates, decoder)
}

/// Select the cover from a Vorbis Comment tag
///
/// FLAC picture blocks come first, then the legacy `METADATA_BLOCK_PICTURE`
/// fields and finally the deprecated `COVERART` field.
pub fn import_cover_image_from_vorbis_comment_tag<D>(
    tag: &VorbisComments,
    decoder: &D,
) -> Option<ArtworkData>
where
    D: ImageDecoder + ?Sized,
{
    let candidates: Vec<_> = tag
        .pictures()
        .iter()
        .map(|(picture, _)| Candidate::typed(picture))
        .collect();
    if let Some(artwork) = select_cover(&candidates, decoder) {
        return Some(artwork);
    }

    let legacy_pictures: Vec<_> = tag
        .get_all(METADATA_BLOCK_PICTURE)
        .filter_map(|encoded| match parse_picture_block(encoded) {
            Ok(picture) => Some(picture),
            Err(e) => {
                warn!("Failed to parse picture from Vorbis Comment metadata block: {}", e);
                None
            }
        })
        .collect();
    if !legacy_pictures.is_empty() {
        warn!("Taking legacy code path for reading cover art from {METADATA_BLOCK_PICTURE}");
        let candidates: Vec<_> = legacy_pictures.iter().map(Candidate::typed).collect();
        if let Some(artwork) = select_cover(&candidates, decoder) {
            return Some(artwork);
        }
    }

    for encoded in tag.get_all(COVERART) {
        warn!("Fallback: Trying to parse image from deprecated field {COVERART}");
        match base64_decode(encoded).and_then(|data| decoder.decode(&data, None)) {
            Ok(artwork) => return Some(artwork),
            Err(e) => warn!("Failed to parse image from {COVERART}: {}", e),
        }
    }

    debug!("No cover art found in Vorbis Comment tag");
    None
}

/// Select the first decodable `covr` image of an MP4 tag
///
/// `covr` images carry no picture type.
pub fn import_cover_image_from_mp4_tag<D>(tag: &Ilst, decoder: &D) -> Option<ArtworkData>
where
    D: ImageDecoder + ?Sized,
{
    let candidates: Vec<_> = tag
        .pictures()
        .into_iter()
        .flatten()
        .map(|picture| Candidate {
            picture_type: None,
            mime_type: picture.mime_type(),
            data: picture.data(),
        })
        .collect();
    select_cover(&candidates, decoder)
}

/// Select the cover from a tag of any dialect
///
/// RIFF INFO chunks have no picture slot and always yield `None`.
pub fn import_cover_image<D>(tag: &DialectTag, decoder: &D) -> Option<ArtworkData>
where
    D: ImageDecoder + ?Sized,
{
    match tag {
        DialectTag::Id3v2(tag) => import_cover_image_from_id3v2_tag(tag, decoder),
        DialectTag::Ape(tag) => import_cover_image_from_ape_tag(tag, decoder),
        DialectTag::VorbisComment(tag) => import_cover_image_from_vorbis_comment_tag(tag, decoder),
        DialectTag::Mp4(tag) => import_cover_image_from_mp4_tag(tag, decoder),
        DialectTag::RiffInfo(_) => None,
    }
}
