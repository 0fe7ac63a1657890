/// ReplayGain text representations
use crate::diagnostics::{Diagnostic, Diagnostics, TagField};
use soul_core::{ReplayGain, TrackMetadata};

const DB_SUFFIX: &str = "dB";

/// Parse a gain like "-6.48 dB"
///
/// The unit suffix is optional and matched case-insensitively.
pub fn parse_gain_db(text: &str) -> Option<f64> {
    let text = text.trim();
    let number = match text.len().checked_sub(DB_SUFFIX.len()) {
        Some(split) if text.is_char_boundary(split)
            && text[split..].eq_ignore_ascii_case(DB_SUFFIX) =>
        {
            &text[..split]
        }
        _ => text,
    };
    number
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|gain_db| ReplayGain::is_valid_gain_db(*gain_db))
}

/// Format a gain in dB, or an empty string if undefined
pub fn format_gain_db(gain_db: Option<f64>) -> String {
    gain_db
        .map(|gain_db| format!("{gain_db} {DB_SUFFIX}"))
        .unwrap_or_default()
}

/// Parse a linear peak amplitude
pub fn parse_peak(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|peak| ReplayGain::is_valid_peak(*peak))
}

/// Format a linear peak amplitude, or an empty string if undefined
pub fn format_peak(peak: Option<f64>) -> String {
    peak.map(|peak| peak.to_string()).unwrap_or_default()
}

/// Read the track gain into `metadata`
///
/// Several applications write 0 dB when the gain has never been
/// calculated, so that exact value is treated as undefined.
pub fn import_track_gain(metadata: &mut TrackMetadata, text: &str, diagnostics: &mut Diagnostics) {
    let Some(gain_db) = parse_gain_db(text) else {
        diagnostics.push(Diagnostic::MalformedValue {
            field: TagField::ReplayGainTrackGain,
            value: text.to_string(),
        });
        return;
    };
    if gain_db == 0.0 {
        diagnostics.push(Diagnostic::UndefinedGainIgnored {
            value: text.to_string(),
        });
        metadata.replay_gain.gain_db = None;
    } else {
        metadata.replay_gain.gain_db = Some(gain_db);
    }
}

/// Read the track peak into `metadata`
pub fn import_track_peak(metadata: &mut TrackMetadata, text: &str, diagnostics: &mut Diagnostics) {
    match parse_peak(text) {
        Some(peak) => metadata.replay_gain.peak = Some(peak),
        None => diagnostics.push(Diagnostic::MalformedValue {
            field: TagField::ReplayGainTrackPeak,
            value: text.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_gain_with_and_without_unit() {
        assert_eq!(parse_gain_db("-6.48 dB"), Some(-6.48));
        assert_eq!(parse_gain_db("+1.5dB"), Some(1.5));
        assert_eq!(parse_gain_db("3.25 DB"), Some(3.25));
        assert_eq!(parse_gain_db(" -2 "), Some(-2.0));
        assert_eq!(parse_gain_db("dB"), None);
        assert_eq!(parse_gain_db("loud"), None);
    }

    #[test]
    fn gain_round_trip() {
        let text = format_gain_db(Some(-7.31));
        assert_eq!(text, "-7.31 dB");
        assert_eq!(parse_gain_db(&text), Some(-7.31));
        assert_eq!(format_gain_db(None), "");
    }

    #[test]
    fn zero_gain_is_undefined() {
        let mut metadata = TrackMetadata::new();
        metadata.replay_gain.gain_db = Some(-3.0);
        let mut diagnostics = Diagnostics::new();

        import_track_gain(&mut metadata, "0.00 dB", &mut diagnostics);

        assert_eq!(metadata.replay_gain.gain_db, None);
        assert!(matches!(
            diagnostics.events(),
            [Diagnostic::UndefinedGainIgnored { .. }]
        ));
    }

    #[test]
    fn malformed_gain_keeps_previous_value() {
        let mut metadata = TrackMetadata::new();
        metadata.replay_gain.gain_db = Some(-3.0);
        let mut diagnostics = Diagnostics::new();

        import_track_gain(&mut metadata, "n/a", &mut diagnostics);

        assert_eq!(metadata.replay_gain.gain_db, Some(-3.0));
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn peak_parsing() {
        assert_eq!(parse_peak("0.988831"), Some(0.988831));
        assert_eq!(parse_peak("-1"), None);
        assert_eq!(format_peak(Some(1.0)), "1");
    }
}
