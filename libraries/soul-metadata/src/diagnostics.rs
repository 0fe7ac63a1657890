/// Structured diagnostics reported by the dialect adapters
use std::fmt;
use tracing::{debug, warn};

/// Canonical field a diagnostic refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagField {
    Year,
    TrackNumber,
    Bpm,
    ReplayGainTrackGain,
    ReplayGainTrackPeak,
}

impl fmt::Display for TagField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Year => "year",
            Self::TrackNumber => "track number",
            Self::Bpm => "BPM",
            Self::ReplayGainTrackGain => "track gain",
            Self::ReplayGainTrackPeak => "track peak",
        };
        f.write_str(name)
    }
}

/// A notable event while importing or exporting a tag
///
/// Adapters never log directly. They push events into a caller-owned
/// [`Diagnostics`] sink and keep going with the next field.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A BPM written without its decimal point was scaled down
    BpmRepaired { original: f64, repaired: f64 },

    /// A gain of exactly 0 dB was read and treated as undefined
    UndefinedGainIgnored { value: String },

    /// Non-standard frames or fields were deleted while writing
    NonStandardFieldsRemoved { field: String, count: usize },

    /// Track numbers could not be parsed and were not written
    InvalidTrackNumbers { value: String },

    /// A field was present but its value could not be parsed
    MalformedValue { field: TagField, value: String },
}

impl Diagnostic {
    /// Whether the event indicates lost or discarded data
    pub fn is_warning(&self) -> bool {
        !matches!(self, Self::UndefinedGainIgnored { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BpmRepaired { original, repaired } => {
                write!(f, "Changed BPM from {original} to {repaired}")
            }
            Self::UndefinedGainIgnored { value } => {
                write!(f, "Ignoring possibly undefined gain: {value}")
            }
            Self::NonStandardFieldsRemoved { field, count } => {
                write!(f, "Removed {count} non-standard {field} field(s)")
            }
            Self::InvalidTrackNumbers { value } => write!(f, "Invalid track numbers: {value}"),
            Self::MalformedValue { field, value } => {
                write!(f, "Malformed {field} value: {value:?}")
            }
        }
    }
}

/// Collects [`Diagnostic`] events for a single import or export call
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    events: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.events.push(diagnostic);
    }

    /// All recorded events in order
    pub fn events(&self) -> &[Diagnostic] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Forward all recorded events to `tracing`
    pub fn trace(&self) {
        for event in &self.events {
            if event.is_warning() {
                warn!("{event}");
            } else {
                debug!("{event}");
            }
        }
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}
