use crate::error::Result;
use crate::format::{decode_base64, decode_binary, encode_base64, encode_binary, BeatGridFormat};
use crate::marker::{NonTerminalMarker, TerminalMarker};
use soul_core::Bpm;
use tracing::warn;

const MILLIS_PER_MINUTE: f64 = 60_000.0;

/// Serato beat grid
///
/// A grid is either empty or ends with a terminal marker. Non-terminal
/// markers define sections with a fixed number of beats, the terminal
/// marker defines the tempo until the end of the track.
///
/// Equality only compares the markers, the footer byte is ignored.
#[derive(Debug, Clone, Default)]
pub struct BeatGrid {
    non_terminal_markers: Vec<NonTerminalMarker>,
    terminal_marker: Option<TerminalMarker>,
    footer: u8,
}

impl BeatGrid {
    pub fn new(
        non_terminal_markers: Vec<NonTerminalMarker>,
        terminal_marker: Option<TerminalMarker>,
    ) -> Self {
        Self {
            non_terminal_markers,
            terminal_marker,
            footer: 0,
        }
    }

    /// Decode a grid from the contents of a tag field
    pub fn parse(data: &[u8], format: BeatGridFormat) -> Result<Self> {
        match format {
            BeatGridFormat::Binary => decode_binary(data),
            BeatGridFormat::Base64 => decode_base64(data),
        }
    }

    /// Encode the grid for a tag field
    ///
    /// Fails if the grid has non-terminal markers but no terminal marker.
    pub fn dump(&self, format: BeatGridFormat) -> Result<Vec<u8>> {
        match format {
            BeatGridFormat::Binary => encode_binary(self),
            BeatGridFormat::Base64 => encode_base64(self).map(String::into_bytes),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.terminal_marker.is_none() && self.non_terminal_markers.is_empty()
    }

    pub fn non_terminal_markers(&self) -> &[NonTerminalMarker] {
        &self.non_terminal_markers
    }

    pub fn terminal_marker(&self) -> Option<&TerminalMarker> {
        self.terminal_marker.as_ref()
    }

    pub fn footer(&self) -> u8 {
        self.footer
    }

    pub fn set_non_terminal_markers(&mut self, markers: Vec<NonTerminalMarker>) {
        self.non_terminal_markers = markers;
    }

    pub fn set_terminal_marker(&mut self, marker: Option<TerminalMarker>) {
        self.terminal_marker = marker;
    }

    pub fn set_footer(&mut self, footer: u8) {
        self.footer = footer;
    }

    #[must_use]
    pub fn with_non_terminal_markers(mut self, markers: Vec<NonTerminalMarker>) -> Self {
        self.set_non_terminal_markers(markers);
        self
    }

    #[must_use]
    pub fn with_terminal_marker(mut self, marker: Option<TerminalMarker>) -> Self {
        self.set_terminal_marker(marker);
        self
    }

    #[must_use]
    pub fn with_footer(mut self, footer: u8) -> Self {
        self.set_footer(footer);
        self
    }

    /// Absolute beat positions in milliseconds
    ///
    /// Each non-terminal marker spreads its beats evenly up to the next
    /// marker. From the terminal marker on, beats follow its BPM until
    /// `track_length_ms` is reached. `timing_offset_ms` is added to every
    /// marker position. A grid without terminal marker has no beats.
    ///
    /// Sections and terminal tempos outside the valid [`Bpm`] range are
    /// not expanded. A section is skipped entirely, an invalid terminal
    /// tempo only yields the beat at the terminal marker.
    pub fn beat_positions_millis(&self, track_length_ms: f64, timing_offset_ms: f64) -> Vec<f64> {
        let Some(terminal) = self.terminal_marker else {
            return Vec::new();
        };
        let position_ms = |position_secs: f32| f64::from(position_secs) * 1000.0 + timing_offset_ms;

        let mut beats = Vec::new();
        let next_positions = self
            .non_terminal_markers
            .iter()
            .skip(1)
            .map(|marker| marker.position_secs)
            .chain(std::iter::once(terminal.position_secs));
        for (marker, next_position_secs) in self.non_terminal_markers.iter().zip(next_positions) {
            let beat_count = marker.beats_till_next_marker;
            if beat_count == 0 {
                continue;
            }
            let start_ms = position_ms(marker.position_secs);
            let section_ms = position_ms(next_position_secs) - start_ms;
            // Bounds the beat count by the length of the section
            let section_bpm = f64::from(beat_count) * MILLIS_PER_MINUTE / section_ms;
            if !Bpm::is_valid_value(section_bpm) {
                warn!(
                    "Skipping beat grid section at {} ms: {} beats in {} ms",
                    start_ms, beat_count, section_ms
                );
                continue;
            }
            let beat_length_ms = section_ms / f64::from(beat_count);
            beats.extend(
                (0..beat_count).map(|beat| start_ms + f64::from(beat) * beat_length_ms),
            );
        }

        let start_ms = position_ms(terminal.position_secs);
        let bpm = f64::from(terminal.bpm);
        if !Bpm::is_valid_value(bpm) || !track_length_ms.is_finite() {
            if start_ms < track_length_ms {
                beats.push(start_ms);
            }
            return beats;
        }
        let beat_length_ms = MILLIS_PER_MINUTE / bpm;
        beats.extend(
            (0..=u32::MAX)
                .map(|beat| start_ms + f64::from(beat) * beat_length_ms)
                .take_while(|position| *position < track_length_ms),
        );
        beats
    }
}

impl PartialEq for BeatGrid {
    fn eq(&self, other: &Self) -> bool {
        self.non_terminal_markers == other.non_terminal_markers
            && self.terminal_marker == other.terminal_marker
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_footer() {
        let grid = BeatGrid::new(Vec::new(), Some(TerminalMarker::new(0.0, 120.0)));
        assert_eq!(grid.clone().with_footer(1), grid);
        assert_ne!(grid, BeatGrid::default());
    }

    #[test]
    fn setters_leave_original_untouched() {
        let grid = BeatGrid::default();
        let changed = grid
            .clone()
            .with_terminal_marker(Some(TerminalMarker::new(1.0, 128.0)));
        assert!(grid.is_empty());
        assert!(!changed.is_empty());
    }

    #[test]
    fn constant_tempo_beats() {
        let grid = BeatGrid::new(Vec::new(), Some(TerminalMarker::new(0.5, 120.0)));
        assert_eq!(
            grid.beat_positions_millis(2500.0, 0.0),
            vec![500.0, 1000.0, 1500.0, 2000.0]
        );
        assert_eq!(
            grid.beat_positions_millis(2500.0, 100.0),
            vec![600.0, 1100.0, 1600.0, 2100.0]
        );
    }

    #[test]
    fn non_terminal_sections_spread_beats_evenly() {
        let grid = BeatGrid::new(
            vec![
                NonTerminalMarker::new(0.0, 2),
                NonTerminalMarker::new(1.0, 4),
            ],
            Some(TerminalMarker::new(2.0, 240.0)),
        );
        assert_eq!(
            grid.beat_positions_millis(2600.0, 0.0),
            vec![0.0, 500.0, 1000.0, 1250.0, 1500.0, 1750.0, 2000.0, 2250.0, 2500.0]
        );
    }

    #[test]
    fn no_beats_without_terminal_marker() {
        let grid = BeatGrid::new(vec![NonTerminalMarker::new(0.0, 4)], None);
        assert!(grid.beat_positions_millis(10_000.0, 0.0).is_empty());
        assert!(BeatGrid::default()
            .beat_positions_millis(10_000.0, 0.0)
            .is_empty());
    }

    #[test]
    fn invalid_tempo_yields_single_terminal_beat() {
        let grid = BeatGrid::new(Vec::new(), Some(TerminalMarker::new(1.0, 0.0)));
        assert_eq!(grid.beat_positions_millis(5000.0, 0.0), vec![1000.0]);
    }

    #[test]
    fn excessive_terminal_tempo_is_not_extrapolated() {
        for bpm in [1e7, f32::INFINITY, f32::NAN, -120.0] {
            let grid = BeatGrid::new(Vec::new(), Some(TerminalMarker::new(1.0, bpm)));
            assert_eq!(grid.beat_positions_millis(3_600_000.0, 0.0), vec![1000.0]);
        }
    }

    #[test]
    fn unbounded_track_length_is_not_extrapolated() {
        let grid = BeatGrid::new(Vec::new(), Some(TerminalMarker::new(1.0, 120.0)));
        assert_eq!(grid.beat_positions_millis(f64::INFINITY, 0.0), vec![1000.0]);
    }

    #[test]
    fn section_with_excessive_beat_count_is_skipped() {
        let grid = BeatGrid::new(
            vec![
                NonTerminalMarker::new(0.0, u32::MAX),
                NonTerminalMarker::new(1.0, 2),
            ],
            Some(TerminalMarker::new(2.0, 120.0)),
        );
        assert_eq!(
            grid.beat_positions_millis(2600.0, 0.0),
            vec![1000.0, 1500.0, 2000.0, 2500.0]
        );
    }

    #[test]
    fn empty_or_reversed_sections_are_skipped() {
        let grid = BeatGrid::new(
            vec![
                NonTerminalMarker::new(1.0, 1),
                NonTerminalMarker::new(1.0, 4),
                NonTerminalMarker::new(0.5, 2),
            ],
            Some(TerminalMarker::new(1.5, 120.0)),
        );
        assert_eq!(
            grid.beat_positions_millis(1600.0, 0.0),
            vec![500.0, 1000.0, 1500.0]
        );
    }
}
