/// Track number and total handling
///
/// Some formats store "number/total" in one field, others use two fields or
/// a pair of integers. The canonical model keeps both parts as separate
/// strings.

const SEPARATOR: char = '/';

/// Split a combined "number/total" string into its trimmed parts
///
/// The total is empty if there is no separator.
pub fn split_combined(text: &str) -> (&str, &str) {
    match text.split_once(SEPARATOR) {
        Some((number, total)) => (number.trim(), total.trim()),
        None => (text.trim(), ""),
    }
}

/// Join number and total into a combined string
pub fn join_strings(number: &str, total: &str) -> String {
    if total.is_empty() {
        number.to_string()
    } else {
        format!("{number}{SEPARATOR}{total}")
    }
}

/// Parsed track numbers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackNumbers {
    /// Track number, starting at 1
    pub actual: Option<u32>,

    /// Total number of tracks
    pub total: Option<u32>,
}

/// Outcome of parsing track numbers from text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackNumbersParse {
    /// Neither number nor total are present
    Empty,

    /// At least one part is present and all present parts are valid
    Valid(TrackNumbers),

    /// A present part is not a positive integer
    Invalid,
}

impl TrackNumbers {
    pub fn new(actual: Option<u32>, total: Option<u32>) -> Self {
        Self { actual, total }
    }

    /// Create from integers where 0 means undefined
    pub fn from_integers(actual: u32, total: u32) -> Self {
        Self {
            actual: (actual > 0).then_some(actual),
            total: (total > 0).then_some(total),
        }
    }

    /// Parse a combined "number/total" string
    pub fn parse(text: &str) -> TrackNumbersParse {
        let (number, total) = split_combined(text);
        Self::parse_from_strings(number, total)
    }

    /// Parse number and total from separate strings
    pub fn parse_from_strings(number: &str, total: &str) -> TrackNumbersParse {
        let (Ok(actual), Ok(total)) = (parse_value(number), parse_value(total)) else {
            return TrackNumbersParse::Invalid;
        };
        if actual.is_none() && total.is_none() {
            TrackNumbersParse::Empty
        } else {
            TrackNumbersParse::Valid(Self { actual, total })
        }
    }

    /// String representation of both parts
    pub fn to_strings(self) -> (Option<String>, Option<String>) {
        (
            self.actual.map(|actual| actual.to_string()),
            self.total.map(|total| total.to_string()),
        )
    }
}

/// Parse a single part: `Ok(None)` if empty, `Err` if not a positive integer
fn parse_value(text: &str) -> Result<Option<u32>, ()> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    match text.parse::<u32>() {
        Ok(value) if value > 0 => Ok(Some(value)),
        _ => Err(()),
    }
}
