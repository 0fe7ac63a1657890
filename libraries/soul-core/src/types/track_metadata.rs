/// Canonical track metadata
use crate::types::{AudioProperties, Bpm, ReplayGain};
use serde::{Deserialize, Serialize};

/// Track metadata in its normalized form
///
/// Every tag dialect is imported into and exported from this type. All
/// fields are independently optional: `None` means the value is absent,
/// which is different from an empty string. Nothing is ever filled in with
/// a made-up default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackMetadata {
    /// Track title
    pub title: Option<String>,

    /// Artist name
    pub artist: Option<String>,

    /// Album name
    pub album: Option<String>,

    /// Album artist
    pub album_artist: Option<String>,

    /// Composer
    pub composer: Option<String>,

    /// Content group (e.g. work or movement)
    pub grouping: Option<String>,

    /// Genre
    pub genre: Option<String>,

    /// Comment
    pub comment: Option<String>,

    /// Release date or year
    ///
    /// Kept as text because tags store anything from a bare year to a full
    /// ISO 8601 timestamp.
    pub year: Option<String>,

    /// Track number, without the total
    pub track_number: Option<String>,

    /// Total number of tracks
    pub track_total: Option<String>,

    /// Tempo
    pub bpm: Option<Bpm>,

    /// Track ReplayGain
    #[serde(default)]
    pub replay_gain: ReplayGain,

    /// Musical key (free text, e.g. "Am" or "8A")
    pub key: Option<String>,

    /// Stream properties, informational only
    #[serde(default)]
    pub audio: AudioProperties,
}

impl TrackMetadata {
    /// Create empty metadata
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if metadata has any tag information
    ///
    /// Audio properties are not considered, because they are not part of the
    /// tags.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.artist.is_none()
            && self.album.is_none()
            && self.album_artist.is_none()
            && self.composer.is_none()
            && self.grouping.is_none()
            && self.genre.is_none()
            && self.comment.is_none()
            && self.year.is_none()
            && self.track_number.is_none()
            && self.track_total.is_none()
            && self.bpm.is_none()
            && self.replay_gain.is_undefined()
            && self.key.is_none()
    }
}
