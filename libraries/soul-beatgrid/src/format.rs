//! Serato BeatGrid wire formats
//!
//! All numbers are big-endian:
//!
//! ```text
//! version        2 bytes   0x01 0x00
//! marker count   u32
//! non-terminal   (count - 1) x (position f32, beats till next marker u32)
//! terminal       position f32, bpm f32
//! footer         1 byte
//! ```
//!
//! A count of zero is the empty grid and carries no marker records at all.
//! Text-only dialects store the same bytes base64-encoded behind a MIME
//! style header.

use crate::error::{BeatGridError, Result};
use crate::grid::BeatGrid;
use crate::marker::{NonTerminalMarker, TerminalMarker};
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use soul_metadata::TagDialect;

const VERSION: [u8; 2] = [0x01, 0x00];
const HEADER_LEN: usize = 6;
const RECORD_LEN: usize = 8;
const FOOTER_LEN: usize = 1;

/// Header of the decoded base64 payload
const BASE64_PAYLOAD_HEADER: &[u8] = b"application/octet-stream\0\0Serato BeatGrid\0";
const BASE64_LINE_LEN: usize = 72;

const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encoding of a beat grid inside a tag field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BeatGridFormat {
    /// Raw bytes, stored in an ID3v2 `GEOB` frame
    Binary,
    /// Wrapped base64 text, stored in Vorbis Comment and MP4 fields
    Base64,
}

impl BeatGridFormat {
    /// Select the format for the storage field of a dialect
    pub fn for_dialect(dialect: TagDialect) -> Result<Self> {
        match dialect {
            TagDialect::Id3v2 => Ok(Self::Binary),
            TagDialect::VorbisComment | TagDialect::Mp4 => Ok(Self::Base64),
            TagDialect::Ape | TagDialect::RiffInfo => Err(BeatGridError::UnsupportedDialect(dialect)),
        }
    }
}

fn be_u32(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

fn be_f32(bytes: &[u8]) -> f32 {
    f32::from_bits(be_u32(bytes))
}

pub(crate) fn decode_binary(data: &[u8]) -> Result<BeatGrid> {
    if data.len() < HEADER_LEN + FOOTER_LEN {
        return Err(BeatGridError::SizeMismatch {
            expected: HEADER_LEN + FOOTER_LEN,
            actual: data.len(),
        });
    }
    if data[..2] != VERSION {
        return Err(BeatGridError::UnsupportedVersion {
            major: data[0],
            minor: data[1],
        });
    }

    let count = be_u32(&data[2..HEADER_LEN]) as usize;
    let expected = count
        .checked_mul(RECORD_LEN)
        .and_then(|records| records.checked_add(HEADER_LEN + FOOTER_LEN))
        .ok_or(BeatGridError::TooManyMarkers(count))?;
    if data.len() != expected {
        return Err(BeatGridError::SizeMismatch {
            expected,
            actual: data.len(),
        });
    }

    let footer = data[data.len() - FOOTER_LEN];
    let records = &data[HEADER_LEN..data.len() - FOOTER_LEN];
    if count == 0 {
        return Ok(BeatGrid::default().with_footer(footer));
    }
    let (non_terminal, terminal) = records.split_at(records.len() - RECORD_LEN);

    let non_terminal_markers = non_terminal
        .chunks_exact(RECORD_LEN)
        .map(|record| NonTerminalMarker::new(be_f32(&record[..4]), be_u32(&record[4..])))
        .collect();
    let terminal_marker = TerminalMarker::new(be_f32(&terminal[..4]), be_f32(&terminal[4..]));

    Ok(BeatGrid::new(non_terminal_markers, Some(terminal_marker)).with_footer(footer))
}

pub(crate) fn encode_binary(grid: &BeatGrid) -> Result<Vec<u8>> {
    let non_terminal = grid.non_terminal_markers();
    let count = match grid.terminal_marker() {
        Some(_) => non_terminal.len() + 1,
        None if non_terminal.is_empty() => 0,
        None => return Err(BeatGridError::MissingTerminalMarker),
    };
    let encoded_count =
        u32::try_from(count).map_err(|_| BeatGridError::TooManyMarkers(count))?;

    let mut data = Vec::with_capacity(HEADER_LEN + count * RECORD_LEN + FOOTER_LEN);
    data.extend_from_slice(&VERSION);
    data.extend_from_slice(&encoded_count.to_be_bytes());
    for marker in non_terminal {
        data.extend_from_slice(&marker.position_secs.to_be_bytes());
        data.extend_from_slice(&marker.beats_till_next_marker.to_be_bytes());
    }
    if let Some(marker) = grid.terminal_marker() {
        data.extend_from_slice(&marker.position_secs.to_be_bytes());
        data.extend_from_slice(&marker.bpm.to_be_bytes());
    }
    data.push(grid.footer());
    Ok(data)
}

pub(crate) fn decode_base64(text: &[u8]) -> Result<BeatGrid> {
    let compact: Vec<u8> = text
        .iter()
        .copied()
        .filter(|byte| !byte.is_ascii_whitespace())
        .collect();
    let payload = BASE64.decode(compact)?;
    let data = payload
        .strip_prefix(BASE64_PAYLOAD_HEADER)
        .ok_or(BeatGridError::InvalidPayloadHeader)?;
    decode_binary(data)
}

/// Encode as base64 text, wrapped into lines of 72 characters
pub(crate) fn encode_base64(grid: &BeatGrid) -> Result<String> {
    let mut payload = BASE64_PAYLOAD_HEADER.to_vec();
    payload.extend(encode_binary(grid)?);
    let encoded = BASE64.encode(payload);

    let mut wrapped = String::with_capacity(encoded.len() + encoded.len() / BASE64_LINE_LEN);
    for (index, line) in encoded.as_bytes().chunks(BASE64_LINE_LEN).enumerate() {
        if index > 0 {
            wrapped.push('\n');
        }
        // base64 output is always ASCII
        wrapped.extend(line.iter().map(|byte| char::from(*byte)));
    }
    Ok(wrapped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_per_dialect() {
        assert_eq!(
            BeatGridFormat::for_dialect(TagDialect::Id3v2).unwrap(),
            BeatGridFormat::Binary
        );
        assert_eq!(
            BeatGridFormat::for_dialect(TagDialect::VorbisComment).unwrap(),
            BeatGridFormat::Base64
        );
        assert_eq!(
            BeatGridFormat::for_dialect(TagDialect::Mp4).unwrap(),
            BeatGridFormat::Base64
        );
        assert!(matches!(
            BeatGridFormat::for_dialect(TagDialect::Ape),
            Err(BeatGridError::UnsupportedDialect(TagDialect::Ape))
        ));
        assert!(BeatGridFormat::for_dialect(TagDialect::RiffInfo).is_err());
    }

    #[test]
    fn binary_layout() {
        let grid = BeatGrid::new(
            vec![NonTerminalMarker::new(0.5, 4)],
            Some(TerminalMarker::new(2.5, 120.0)),
        )
        .with_footer(0x2A);

        let data = encode_binary(&grid).unwrap();
        assert_eq!(
            data,
            [
                0x01, 0x00, // version
                0x00, 0x00, 0x00, 0x02, // count
                0x3F, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x04, // 0.5, 4 beats
                0x40, 0x20, 0x00, 0x00, 0x42, 0xF0, 0x00, 0x00, // 2.5, 120 bpm
                0x2A, // footer
            ]
        );

        let decoded = decode_binary(&data).unwrap();
        assert_eq!(decoded, grid);
        assert_eq!(decoded.footer(), 0x2A);
    }

    #[test]
    fn empty_grid_is_header_and_footer() {
        let data = encode_binary(&BeatGrid::default()).unwrap();
        assert_eq!(data, [0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
        assert!(decode_binary(&data).unwrap().is_empty());
    }

    #[test]
    fn size_mismatch_is_rejected() {
        let grid = BeatGrid::new(Vec::new(), Some(TerminalMarker::new(0.0, 128.0)));
        let mut data = encode_binary(&grid).unwrap();

        data.push(0);
        assert!(matches!(
            decode_binary(&data),
            Err(BeatGridError::SizeMismatch {
                expected: 15,
                actual: 16
            })
        ));

        data.truncate(10);
        assert!(matches!(
            decode_binary(&data),
            Err(BeatGridError::SizeMismatch { .. })
        ));
        assert!(decode_binary(&[0x01, 0x00]).is_err());
    }

    #[test]
    fn huge_marker_count_is_rejected() {
        let data = [0x01, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0x00];
        assert!(decode_binary(&data).is_err());
    }

    #[test]
    fn unknown_version_is_rejected() {
        let data = [0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
        assert!(matches!(
            decode_binary(&data),
            Err(BeatGridError::UnsupportedVersion {
                major: 0x02,
                minor: 0x00
            })
        ));
    }

    #[test]
    fn markers_without_terminal_cannot_be_encoded() {
        let grid = BeatGrid::new(vec![NonTerminalMarker::new(0.0, 4)], None);
        assert!(matches!(
            encode_binary(&grid),
            Err(BeatGridError::MissingTerminalMarker)
        ));
    }

    #[test]
    fn base64_is_wrapped_without_padding() {
        let markers = (0..10)
            .map(|index| NonTerminalMarker::new(index as f32, 16))
            .collect();
        let grid = BeatGrid::new(markers, Some(TerminalMarker::new(10.0, 128.0)));

        let text = encode_base64(&grid).unwrap();
        assert!(!text.contains('='));
        assert!(text.lines().count() > 1);
        assert!(text.lines().all(|line| line.len() <= BASE64_LINE_LEN));
        assert!(text.lines().rev().skip(1).all(|line| line.len() == BASE64_LINE_LEN));

        assert_eq!(decode_base64(text.as_bytes()).unwrap(), grid);
    }

    #[test]
    fn base64_requires_payload_header() {
        let text = BASE64.encode(encode_binary(&BeatGrid::default()).unwrap());
        assert!(matches!(
            decode_base64(text.as_bytes()),
            Err(BeatGridError::InvalidPayloadHeader)
        ));
        assert!(matches!(
            decode_base64(b"not base64!"),
            Err(BeatGridError::Base64(_))
        ));
    }
}
