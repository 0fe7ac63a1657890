//! Soul Player Core
//!
//! Platform-agnostic core types and error handling shared by the tag
//! libraries of Soul Player.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Canonical Metadata**: `TrackMetadata`, the single normalized view of a
//!   track's tags that every tag dialect converts to and from
//! - **Value Types**: `Bpm`, `ReplayGain`, `AudioProperties`
//! - **Error Handling**: Unified `SoulError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use soul_core::{Bpm, ReplayGain, TrackMetadata};
//!
//! let mut metadata = TrackMetadata::new();
//! metadata.title = Some("My Favorite Song".to_string());
//! metadata.bpm = Bpm::new(128.0);
//! metadata.replay_gain = ReplayGain::new(Some(-6.5), Some(0.98));
//!
//! assert!(!metadata.is_empty());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{Result, SoulError};
pub use types::{AudioProperties, Bpm, ReplayGain, TrackMetadata};
