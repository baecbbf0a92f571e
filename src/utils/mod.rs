pub mod logging;

use std::fmt::Display;

use chrono::{DateTime, ParseError, TimeZone};

/// `2020-04-01_22-54-21`, always whole seconds.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Extension after the last `.`, or an empty string when there is none.
pub fn file_extension(file_name: &str) -> &str {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .unwrap_or("")
}

/// Replace characters that are path separators or invalid in file names on
/// common platforms, so a name always lands directly in the output directory.
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            _ => c,
        })
        .collect()
}

/// Parse an RFC 3339 timestamp and move it into the given zone.
pub fn parse_timestamp<Tz: TimeZone>(raw: &str, tz: &Tz) -> Result<DateTime<Tz>, ParseError> {
    DateTime::parse_from_rfc3339(raw).map(|dt| dt.with_timezone(tz))
}

pub fn format_timestamp<Tz>(dt: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    dt.format(TIMESTAMP_FORMAT).to_string()
}
