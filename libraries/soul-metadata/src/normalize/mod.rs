//! Numeric and date normalizers
//!
//! Tags store numbers as text, and every format has its own habits. The
//! functions in here never fail: unparsable input yields `None`, never a
//! made-up zero.

pub mod bpm;
pub mod date;
pub mod replay_gain;
pub mod track_numbers;

pub use bpm::{format_bpm, format_bpm_integer, parse_bpm, parse_bpm_repairing_decimal, repair_decimal_bpm};
pub use date::{calendar_year, format_date, parse_date};
pub use replay_gain::{
    format_gain_db, format_peak, import_track_gain, import_track_peak, parse_gain_db, parse_peak,
};
pub use track_numbers::{join_strings, split_combined, TrackNumbers, TrackNumbersParse};
