/// ReplayGain value type
use serde::{Deserialize, Serialize};

/// Track ReplayGain
///
/// The gain is kept in decibels, the same unit it is stored in by every tag
/// format, so that reading and writing never loses precision. Both parts are
/// independently undefined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplayGain {
    /// Gain in dB
    pub gain_db: Option<f64>,

    /// Peak amplitude (linear, 1.0 = full scale)
    pub peak: Option<f64>,
}

impl ReplayGain {
    /// Create a ReplayGain from its parts
    pub const fn new(gain_db: Option<f64>, peak: Option<f64>) -> Self {
        Self { gain_db, peak }
    }

    /// Check whether a gain value is usable
    pub fn is_valid_gain_db(gain_db: f64) -> bool {
        gain_db.is_finite()
    }

    /// Check whether a peak value is usable
    pub fn is_valid_peak(peak: f64) -> bool {
        peak.is_finite() && peak >= 0.0
    }

    /// Linear gain ratio derived from the dB value
    pub fn ratio(&self) -> Option<f64> {
        self.gain_db.map(|db| 10.0_f64.powf(db / 20.0))
    }

    /// Set the gain from a linear ratio
    ///
    /// Non-positive ratios have no dB representation and reset the gain.
    pub fn set_ratio(&mut self, ratio: f64) {
        self.gain_db = (ratio.is_finite() && ratio > 0.0).then(|| 20.0 * ratio.log10());
    }

    /// Check whether neither gain nor peak are defined
    pub fn is_undefined(&self) -> bool {
        self.gain_db.is_none() && self.peak.is_none()
    }
}
