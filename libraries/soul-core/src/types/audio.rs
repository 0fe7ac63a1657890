/// Audio stream properties reported by the container
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Informational audio properties of a track
///
/// These are read from the file's stream headers, never from tags, and
/// are not written back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioProperties {
    /// Track duration
    pub duration: Option<Duration>,

    /// Number of channels (1 = mono, 2 = stereo, etc.)
    pub channels: Option<u16>,

    /// Sample rate in Hz
    pub sample_rate: Option<u32>,

    /// Average bitrate in kbit/s
    pub bitrate_kbps: Option<u32>,
}

impl AudioProperties {
    /// Duration in whole milliseconds
    pub fn duration_ms(&self) -> Option<u64> {
        self.duration.map(|duration| duration.as_millis() as u64)
    }
}
