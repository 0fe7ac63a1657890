mod audio;
mod bpm;
mod replay_gain;
mod track_metadata;

pub use audio::AudioProperties;
pub use bpm::Bpm;
pub use replay_gain::ReplayGain;
pub use track_metadata::TrackMetadata;
