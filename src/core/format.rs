//! Event line formatting
//!
//! Pure functions assembling the single-line output format:
//!
//! ```text
//! timestamp='<ts>' logger='<name>' level='<levelname>' event='<message>' k1=v1 k2=v2\n
//! ```
//!
//! The layout is a stable contract consumed by downstream log processors.
//! Field order is fixed, attributes follow in insertion order, and the
//! trailing space before the newline remains when the attribute set is
//! empty.

use super::fields::EventFields;
use super::level::Level;
use chrono::{DateTime, Utc};
use std::borrow::Cow;
use std::fmt::Write as _;

/// Escape single quotes in the event message.
///
/// The message is rendered inside `event='...'`, so embedded quotes are
/// backslash-prefixed. Borrows unchanged when no quote is present, which is
/// the common case on the emission path.
#[must_use]
pub fn escape_event(message: &str) -> Cow<'_, str> {
    if message.contains('\'') {
        Cow::Owned(message.replace('\'', "\\'"))
    } else {
        Cow::Borrowed(message)
    }
}

/// Render a UTC timestamp as ISO-8601 with a `T` separator and trailing `Z`.
///
/// Subseconds are omitted when zero, so a whole-second clock renders as
/// `2020-01-01T00:00:00Z`.
#[must_use]
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    format!("{}Z", timestamp.format("%Y-%m-%dT%H:%M:%S%.f"))
}

/// Assemble one complete log entry, including the trailing newline.
#[must_use]
pub fn format_entry(
    timestamp: &str,
    logger: &str,
    level: Level,
    message: &str,
    fields: &EventFields,
) -> String {
    let message = escape_event(message);

    let mut entry = String::with_capacity(
        48 + timestamp.len() + logger.len() + message.len() + fields.len() * 16,
    );
    let _ = write!(
        entry,
        "timestamp='{}' logger='{}' level='{}' event='{}' ",
        timestamp,
        logger,
        level.as_str(),
        message,
    );

    let mut first = true;
    for (key, value) in fields.iter() {
        if first {
            first = false;
        } else {
            entry.push(' ');
        }
        let _ = write!(entry, "{}={}", key, value);
    }
    entry.push('\n');
    entry
}

/// Render an error and its source chain as the trace text appended after an
/// `exception` entry's line.
#[must_use]
pub fn render_error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut trace = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let _ = write!(trace, "\ncaused by: {}", cause);
        source = cause.source();
    }
    trace
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0)
            .single()
            .expect("valid datetime")
    }

    #[test]
    fn test_escape_event_no_quotes_borrows() {
        let escaped = escape_event("plain message");
        assert!(matches!(escaped, Cow::Borrowed(_)));
        assert_eq!(escaped, "plain message");
    }

    #[test]
    fn test_escape_event_quotes() {
        assert_eq!(escape_event("msg 'foo'"), "msg \\'foo\\'");
        assert_eq!(escape_event("'''"), "\\'\\'\\'");
    }

    #[test]
    fn test_format_timestamp_whole_second() {
        assert_eq!(format_timestamp(&fixed_timestamp()), "2020-01-01T00:00:00Z");
    }

    #[test]
    fn test_format_timestamp_subseconds() {
        let ts = fixed_timestamp() + chrono::Duration::microseconds(123_456);
        assert_eq!(format_timestamp(&ts), "2020-01-01T00:00:00.123456Z");
    }

    #[test]
    fn test_format_entry_no_fields_keeps_trailing_space() {
        let entry = format_entry(
            "2020-01-01T00:00:00",
            "test",
            Level::Trace,
            "test msg",
            &EventFields::new(),
        );
        assert_eq!(
            entry,
            "timestamp='2020-01-01T00:00:00' logger='test' level='trace' event='test msg' \n"
        );
    }

    #[test]
    fn test_format_entry_with_fields() {
        let fields = EventFields::new().with_field("a", 1).with_field("b", "x");
        let entry = format_entry("ts", "svc.mod", Level::Info, "msg", &fields);
        assert_eq!(
            entry,
            "timestamp='ts' logger='svc.mod' level='info' event='msg' a=1 b='x'\n"
        );
    }

    #[test]
    fn test_format_entry_escapes_message() {
        let entry = format_entry("ts", "test", Level::Debug, "msg 'foo'", &EventFields::new());
        assert_eq!(
            entry,
            "timestamp='ts' logger='test' level='debug' event='msg \\'foo\\'' \n"
        );
    }

    #[test]
    fn test_render_error_chain_single() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        assert_eq!(render_error_chain(&err), "disk on fire");
    }

    #[test]
    fn test_render_error_chain_with_source() {
        #[derive(Debug, thiserror::Error)]
        #[error("request failed")]
        struct RequestError {
            #[source]
            source: std::io::Error,
        }

        let err = RequestError {
            source: std::io::Error::new(std::io::ErrorKind::TimedOut, "connection timed out"),
        };
        assert_eq!(
            render_error_chain(&err),
            "request failed\ncaused by: connection timed out"
        );
    }
}
