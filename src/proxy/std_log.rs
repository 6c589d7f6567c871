//! Adapter implementing the `log` crate facade on top of registry loggers.
//!
//! Third-party code that logs through the conventional facade is routed to
//! the registry logger named by each record's target, with the record's
//! structured key-values carried along as event attributes. The adapter is
//! adopted at the composition root via [`install`]; it does not retrofit
//! logger handles acquired elsewhere.

use crate::core::error::{LevelError, Result};
use crate::core::fields::{EventFields, FieldValue};
use crate::core::level::Level;
use crate::core::manager;

/// Numeric severity codes on the conventional 10..50 scale.
pub const SEVERITY_NOTSET: u32 = 0;
pub const SEVERITY_DEBUG: u32 = 10;
pub const SEVERITY_INFO: u32 = 20;
pub const SEVERITY_WARNING: u32 = 30;
pub const SEVERITY_ERROR: u32 = 40;
pub const SEVERITY_CRITICAL: u32 = 50;

/// Map a numeric severity code onto a [`Level`].
///
/// Codes below the standard scale map to Trace and codes above it to
/// Critical. A code inside the scale that matches no standard tier maps to
/// [`Level::Unmapped`], which filters everything while remaining
/// distinguishable from a deliberate disable.
#[must_use]
pub fn map_severity(code: u32) -> Level {
    if code < SEVERITY_DEBUG {
        return Level::Trace;
    }
    if code > SEVERITY_CRITICAL {
        return Level::Critical;
    }
    match code {
        SEVERITY_DEBUG => Level::Debug,
        SEVERITY_INFO => Level::Info,
        SEVERITY_WARNING => Level::Warn,
        SEVERITY_ERROR => Level::Error,
        SEVERITY_CRITICAL => Level::Critical,
        _ => Level::Unmapped,
    }
}

/// Normalize a conventional severity name to its numeric code.
///
/// Recognized names (case-insensitive): `notset`, `debug`, `info`,
/// `warning`/`warn`, `error`, `critical`/`fatal`. Anything else is a
/// setup-time error surfaced to the caller.
pub fn normalize_severity(name: &str) -> Result<u32> {
    match name.to_uppercase().as_str() {
        "NOTSET" => Ok(SEVERITY_NOTSET),
        "DEBUG" => Ok(SEVERITY_DEBUG),
        "INFO" => Ok(SEVERITY_INFO),
        "WARNING" | "WARN" => Ok(SEVERITY_WARNING),
        "ERROR" => Ok(SEVERITY_ERROR),
        "CRITICAL" | "FATAL" => Ok(SEVERITY_CRITICAL),
        _ => Err(LevelError::UnknownName(name.to_string())),
    }
}

/// Set a registry logger's threshold from a numeric severity code, the way
/// a foreign configuration layer would.
pub fn set_logger_severity(name: &str, severity: u32) {
    manager::global().get_logger(name).set_level(map_severity(severity));
}

fn from_std_level(level: log::Level) -> Level {
    match level {
        log::Level::Error => Level::Error,
        log::Level::Warn => Level::Warn,
        log::Level::Info => Level::Info,
        log::Level::Debug => Level::Debug,
        log::Level::Trace => Level::Trace,
    }
}

fn field_from_value(value: &log::kv::Value<'_>) -> FieldValue {
    if let Some(s) = value.to_borrowed_str() {
        return FieldValue::String(s.to_string());
    }
    if let Some(b) = value.to_bool() {
        return FieldValue::Bool(b);
    }
    if let Some(i) = value.to_i64() {
        return FieldValue::Int(i);
    }
    if let Some(u) = value.to_u64() {
        return FieldValue::UInt(u);
    }
    if let Some(f) = value.to_f64() {
        return FieldValue::Float(f);
    }
    FieldValue::String(value.to_string())
}

struct FieldCollector<'a> {
    fields: &'a mut EventFields,
}

impl<'kvs> log::kv::VisitSource<'kvs> for FieldCollector<'_> {
    fn visit_pair(
        &mut self,
        key: log::kv::Key<'kvs>,
        value: log::kv::Value<'kvs>,
    ) -> std::result::Result<(), log::kv::Error> {
        self.fields.add_field(key.as_str(), field_from_value(&value));
        Ok(())
    }
}

/// A `log::Log` implementation backed by registry loggers.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProxy;

impl LogProxy {
    #[must_use]
    pub fn new() -> Self {
        LogProxy
    }

    /// Emit at an arbitrary numeric severity on the logger named `target`.
    ///
    /// A code resolving to a sentinel is silently ignored: a misconfigured
    /// severity must never crash caller code that is already handling a
    /// failure.
    pub fn dispatch(&self, target: &str, severity: u32, message: &str, fields: EventFields) {
        let logger = manager::global().get_logger(target);
        match map_severity(severity) {
            Level::Trace => logger.trace_with(message, fields),
            Level::Debug => logger.debug_with(message, fields),
            Level::Info => logger.info_with(message, fields),
            Level::Warn => logger.warn_with(message, fields),
            Level::Error => logger.error_with(message, fields),
            Level::Critical => logger.critical_with(message, fields),
            Level::Unmapped | Level::Disabled => {}
        }
    }
}

impl log::Log for LogProxy {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        manager::global()
            .get_logger(metadata.target())
            .enabled_for(from_std_level(metadata.level()))
    }

    fn log(&self, record: &log::Record<'_>) {
        let logger = manager::global().get_logger(record.target());
        let level = from_std_level(record.level());
        if !logger.enabled_for(level) {
            return;
        }

        let mut fields = EventFields::new();
        let mut collector = FieldCollector {
            fields: &mut fields,
        };
        let _ = record.key_values().visit(&mut collector);

        let message = record.args().to_string();
        match level {
            Level::Trace => logger.trace_with(&message, fields),
            Level::Debug => logger.debug_with(&message, fields),
            Level::Info => logger.info_with(&message, fields),
            Level::Warn => logger.warn_with(&message, fields),
            Level::Error => logger.error_with(&message, fields),
            Level::Critical => logger.critical_with(&message, fields),
            Level::Unmapped | Level::Disabled => {}
        }
    }

    fn flush(&self) {}
}

/// Install the proxy as the global `log` logger, forwarding every record.
pub fn install() -> std::result::Result<(), log::SetLoggerError> {
    install_with_max_level(log::LevelFilter::Trace)
}

/// Install the proxy with an upper bound on the levels the facade will
/// forward. Per-logger thresholds still apply underneath.
pub fn install_with_max_level(
    max_level: log::LevelFilter,
) -> std::result::Result<(), log::SetLoggerError> {
    log::set_boxed_logger(Box::new(LogProxy::new()))?;
    log::set_max_level(max_level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_severity_standard_codes() {
        assert_eq!(map_severity(SEVERITY_DEBUG), Level::Debug);
        assert_eq!(map_severity(SEVERITY_INFO), Level::Info);
        assert_eq!(map_severity(SEVERITY_WARNING), Level::Warn);
        assert_eq!(map_severity(SEVERITY_ERROR), Level::Error);
        assert_eq!(map_severity(SEVERITY_CRITICAL), Level::Critical);
    }

    #[test]
    fn test_map_severity_below_scale_is_trace() {
        assert_eq!(map_severity(0), Level::Trace);
        assert_eq!(map_severity(5), Level::Trace);
        assert_eq!(map_severity(9), Level::Trace);
    }

    #[test]
    fn test_map_severity_above_scale_is_critical() {
        assert_eq!(map_severity(51), Level::Critical);
        assert_eq!(map_severity(1000), Level::Critical);
    }

    #[test]
    fn test_map_severity_custom_in_scale_is_unmapped() {
        assert_eq!(map_severity(15), Level::Unmapped);
        assert_eq!(map_severity(25), Level::Unmapped);
        assert_eq!(map_severity(45), Level::Unmapped);
    }

    #[test]
    fn test_normalize_severity_names() {
        assert_eq!(normalize_severity("debug").unwrap(), SEVERITY_DEBUG);
        assert_eq!(normalize_severity("INFO").unwrap(), SEVERITY_INFO);
        assert_eq!(normalize_severity("Warning").unwrap(), SEVERITY_WARNING);
        assert_eq!(normalize_severity("warn").unwrap(), SEVERITY_WARNING);
        assert_eq!(normalize_severity("fatal").unwrap(), SEVERITY_CRITICAL);
        assert_eq!(normalize_severity("notset").unwrap(), SEVERITY_NOTSET);
    }

    #[test]
    fn test_normalize_severity_unknown_name() {
        let err = normalize_severity("loud").unwrap_err();
        assert_eq!(err, LevelError::UnknownName("loud".to_string()));
    }

    #[test]
    fn test_from_std_level() {
        assert_eq!(from_std_level(log::Level::Error), Level::Error);
        assert_eq!(from_std_level(log::Level::Warn), Level::Warn);
        assert_eq!(from_std_level(log::Level::Info), Level::Info);
        assert_eq!(from_std_level(log::Level::Debug), Level::Debug);
        assert_eq!(from_std_level(log::Level::Trace), Level::Trace);
    }
}
