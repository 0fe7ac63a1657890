/// Release date parsing
///
/// The canonical year is free text. These helpers interpret it when a tag
/// format needs a specific granularity.
use chrono::{Datelike, NaiveDate, NaiveDateTime};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Length of an ID3v2.3 `TYER` value ("yyyy")
pub const ID3V2_TYER_LEN: usize = 4;

/// Length of an ID3v2.3 `TDAT` value ("ddMM")
pub const ID3V2_TDAT_LEN: usize = 4;

/// Parse a full calendar date
///
/// Accepts ISO 8601 dates and date-times (with `T` or a space as separator)
/// as well as a date followed by arbitrary text, which some Vorbis Comment
/// writers produce.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(text, DATE_FORMAT) {
        return Some(date);
    }
    if let Some(date_time) = DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
    {
        return Some(date_time.date());
    }
    if let Ok(date_time) = chrono::DateTime::parse_from_rfc3339(text) {
        return Some(date_time.date_naive());
    }
    // Date prefix followed by a time or free text
    let prefix = text.get(..10)?;
    if text[10..].starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(prefix, DATE_FORMAT).ok()
}

/// Extract the calendar year
///
/// Uses the full date if one can be parsed, otherwise a leading four digit
/// year like in "2020" or "2020-05".
pub fn calendar_year(text: &str) -> Option<i32> {
    if let Some(date) = parse_date(text) {
        return (date.year() > 0).then_some(date.year());
    }
    let text = text.trim();
    let digits = text.get(..4)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if text[4..].starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    digits.parse::<i32>().ok().filter(|year| *year > 0)
}

/// Format a date as "yyyy-MM-dd"
pub fn format_date(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Combine ID3v2.3 `TYER` ("yyyy") and `TDAT` ("ddMM") into a date
pub fn parse_id3v2_year_and_date(tyer: &str, tdat: &str) -> Option<NaiveDate> {
    if tyer.len() != ID3V2_TYER_LEN || tdat.len() != ID3V2_TDAT_LEN {
        return None;
    }
    if !tyer.bytes().chain(tdat.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = tyer.parse::<i32>().ok()?;
    let day = tdat[..2].parse::<u32>().ok()?;
    let month = tdat[2..].parse::<u32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Format the ID3v2.3 `TYER` value of a date
pub fn format_id3v2_tyer(year: i32) -> String {
    format!("{year:04}")
}

/// Format the ID3v2.3 `TDAT` value of a date
pub fn format_id3v2_tdat(date: NaiveDate) -> String {
    format!("{:02}{:02}", date.day(), date.month())
}
