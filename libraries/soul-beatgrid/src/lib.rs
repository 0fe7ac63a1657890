//! Soul Beatgrid - Serato BeatGrid codec
//!
//! Serato DJ stores the beat grid of a track as a binary blob inside the
//! file's tag. This crate decodes and encodes that blob in both of its wire
//! formats and derives the beat positions it describes.
//!
//! # Example
//!
//! ```rust
//! use soul_beatgrid::{BeatGrid, BeatGridFormat, TerminalMarker};
//!
//! let grid = BeatGrid::new(Vec::new(), Some(TerminalMarker::new(0.0, 120.0)));
//! let data = grid.dump(BeatGridFormat::Binary)?;
//! assert_eq!(BeatGrid::parse(&data, BeatGridFormat::Binary)?, grid);
//!
//! let beats = grid.beat_positions_millis(2000.0, 0.0);
//! assert_eq!(beats, vec![0.0, 500.0, 1000.0, 1500.0]);
//! # Ok::<(), soul_beatgrid::BeatGridError>(())
//! ```

mod error;
mod format;
mod grid;
mod marker;
pub mod storage;

pub use error::{BeatGridError, Result};
pub use format::BeatGridFormat;
pub use grid::BeatGrid;
pub use marker::{NonTerminalMarker, TerminalMarker};
pub use storage::{read_beat_grid, write_beat_grid};
