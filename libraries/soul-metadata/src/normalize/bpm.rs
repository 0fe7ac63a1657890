/// BPM parsing, formatting and repair
use crate::diagnostics::{Diagnostic, Diagnostics, TagField};
use soul_core::Bpm;

/// Parse a tempo stored as decimal text
pub fn parse_bpm(text: &str) -> Option<Bpm> {
    Bpm::parse(text)
}

/// Format a tempo as decimal text, or an empty string if undefined
pub fn format_bpm(bpm: Option<Bpm>) -> String {
    bpm.map(|bpm| bpm.to_string()).unwrap_or_default()
}

/// Format a tempo as an integer, truncating fractional digits
pub fn format_bpm_integer(bpm: Option<Bpm>) -> String {
    bpm.map(|bpm| bpm.to_integer().to_string())
        .unwrap_or_default()
}

/// Scale down a tempo that was written without its decimal point
///
/// Some applications store 145.2 as "1452" or 145.25 as "14525". While the
/// value exceeds `max_value` it is divided by ten. This is a best-effort
/// heuristic: a legitimate tempo above `max_value` is scaled down as well.
pub fn repair_decimal_bpm(value: f64, max_value: f64) -> f64 {
    let mut repaired = value;
    while repaired > max_value {
        repaired /= 10.0;
    }
    repaired
}

/// Parse a tempo and apply [`repair_decimal_bpm`] before validation
pub fn parse_bpm_repairing_decimal(
    text: &str,
    max_value: f64,
    diagnostics: &mut Diagnostics,
) -> Option<Bpm> {
    let Some(original) = Bpm::parse_value(text) else {
        diagnostics.push(Diagnostic::MalformedValue {
            field: TagField::Bpm,
            value: text.to_string(),
        });
        return None;
    };
    let repaired = repair_decimal_bpm(original, max_value);
    if repaired != original {
        diagnostics.push(Diagnostic::BpmRepaired { original, repaired });
    }
    let bpm = Bpm::new(repaired);
    if bpm.is_none() {
        diagnostics.push(Diagnostic::MalformedValue {
            field: TagField::Bpm,
            value: text.to_string(),
        });
    }
    bpm
}
