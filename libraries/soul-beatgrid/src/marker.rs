/// A marker followed by a fixed number of beats up to the next marker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NonTerminalMarker {
    pub position_secs: f32,
    pub beats_till_next_marker: u32,
}

impl NonTerminalMarker {
    pub fn new(position_secs: f32, beats_till_next_marker: u32) -> Self {
        Self {
            position_secs,
            beats_till_next_marker,
        }
    }
}

/// The last marker, beats continue at a constant tempo until the end
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerminalMarker {
    pub position_secs: f32,
    pub bpm: f32,
}

impl TerminalMarker {
    pub fn new(position_secs: f32, bpm: f32) -> Self {
        Self { position_secs, bpm }
    }
}
