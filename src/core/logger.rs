//! Main logger implementation

use super::{
    context::ContextProcessor,
    fields::EventFields,
    format,
    level::Level,
};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::io::Write as _;
use std::sync::Arc;

/// An output destination. Receives one complete, newline-terminated entry
/// per emitted event.
///
/// The indirection exists for output redirection and test capture; sinks
/// carry no other behavior and are assumed fast or non-blocking.
pub type Sink = Arc<dyn Fn(&str) + Send + Sync>;

/// The logger's time source, swappable for deterministic tests.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

pub(crate) type SharedProcessors = Arc<RwLock<Vec<Arc<dyn ContextProcessor>>>>;

fn default_out() -> Sink {
    Arc::new(|entry: &str| {
        let mut out = std::io::stdout().lock();
        let _ = out.write_all(entry.as_bytes());
    })
}

fn default_err() -> Sink {
    Arc::new(|entry: &str| {
        let mut err = std::io::stderr().lock();
        let _ = err.write_all(entry.as_bytes());
    })
}

fn default_clock() -> Clock {
    Arc::new(Utc::now)
}

/// A named logging channel.
///
/// A logging channel is an area of an application, with no strict
/// definition of "area", identified by the dotted name that appears under
/// the `logger` key in the output. The name carries no hierarchy: levels
/// are per-logger, not inherited.
///
/// Mutable configuration (level, sinks, clock) is expected to be set during
/// startup, with concurrent reads afterwards; reconfiguring while other
/// threads are logging is memory-safe but the interleaving is the caller's
/// to reason about.
pub struct Logger {
    name: String,
    level: RwLock<Level>,
    previous_level: RwLock<Option<Level>>,
    out: RwLock<Sink>,
    err: RwLock<Sink>,
    clock: RwLock<Clock>,
    processors: SharedProcessors,
}

impl Logger {
    /// Create a standalone logger at the default Debug level.
    ///
    /// Better to collect more logs than no logs; production setups lower
    /// the verbosity through the registry.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_level(name, Level::Debug)
    }

    /// Create a standalone logger with an explicit threshold.
    #[must_use]
    pub fn with_level(name: impl Into<String>, level: Level) -> Self {
        Self::with_processors(name, level, Arc::new(RwLock::new(Vec::new())))
    }

    pub(crate) fn with_processors(
        name: impl Into<String>,
        level: Level,
        processors: SharedProcessors,
    ) -> Self {
        Self {
            name: name.into(),
            level: RwLock::new(level),
            previous_level: RwLock::new(None),
            out: RwLock::new(default_out()),
            err: RwLock::new(default_err()),
            clock: RwLock::new(default_clock()),
            processors,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn level(&self) -> Level {
        *self.level.read()
    }

    pub fn set_level(&self, level: Level) {
        *self.level.write() = level;
    }

    /// Replace both sinks. The error sink receives entries at Error rank
    /// and above, the output sink everything below.
    pub fn set_sinks(&self, out: Sink, err: Sink) {
        *self.out.write() = out;
        *self.err.write() = err;
    }

    pub fn set_clock(&self, clock: Clock) {
        *self.clock.write() = clock;
    }

    /// Whether an event at `level` would pass this logger's threshold.
    #[inline]
    #[must_use]
    pub fn enabled_for(&self, level: Level) -> bool {
        self.level.read().rank() <= level.rank()
    }

    /// Whether the logger has been disabled via [`disable`](Self::disable).
    #[must_use]
    pub fn disabled(&self) -> bool {
        *self.level.read() == Level::Disabled
    }

    /// Disable the logger.
    ///
    /// Rather than a separate flag, the level is moved to the sentinel
    /// above every real severity, so the emission path needs no extra
    /// branch. The prior level is remembered once: repeated disables do
    /// not lose the original value.
    pub fn disable(&self) {
        let mut level = self.level.write();
        if *level != Level::Disabled {
            *self.previous_level.write() = Some(*level);
            *level = Level::Disabled;
        }
    }

    /// Enable the logger, restoring the level remembered by the most
    /// recent [`disable`](Self::disable) (or Debug if none was recorded).
    /// No-op when the logger is already at a real severity.
    pub fn enable(&self) {
        let mut level = self.level.write();
        if level.rank() > Level::Critical.rank() {
            *level = (*self.previous_level.read()).unwrap_or(Level::Debug);
        }
    }

    /// The full emission path: reserved-key renames, context merge,
    /// formatting, sink dispatch. Callers have already passed the
    /// threshold check.
    fn emit(&self, level: Level, message: &str, mut fields: EventFields, trace: Option<String>) {
        // Reserved keys collide with the entry's own fixed fields; each
        // colliding key is renamed with an underscore prefix and moves to
        // the end of the attribute order. Checked one key at a time: every
        // one of these runs on the hot path.
        if let Some(value) = fields.remove("timestamp") {
            fields.add_field("_timestamp", value);
        }
        if let Some(value) = fields.remove("logger") {
            fields.add_field("_logger", value);
        }
        if let Some(value) = fields.remove("level") {
            fields.add_field("_level", value);
        }
        if let Some(value) = fields.remove("event") {
            fields.add_field("_event", value);
        }

        for processor in self.processors.read().iter() {
            processor.merge(&mut fields);
        }

        let clock = Arc::clone(&*self.clock.read());
        let timestamp = format::format_timestamp(&(*clock)());
        let mut entry = format::format_entry(&timestamp, &self.name, level, message, &fields);

        if let Some(trace) = trace {
            entry.push_str(&trace);
            if !entry.ends_with('\n') {
                entry.push('\n');
            }
        }

        // Exactly one sink receives exactly one write per emitted event.
        // The lock is released before the write so a sink may itself log.
        let sink = if level.rank() >= Level::Error.rank() {
            Arc::clone(&*self.err.read())
        } else {
            Arc::clone(&*self.out.read())
        };
        (*sink)(&entry);
    }

    /// Log a message at TRACE level.
    pub fn trace(&self, message: &str) {
        if self.enabled_for(Level::Trace) {
            self.emit(Level::Trace, message, EventFields::new(), None);
        }
    }

    /// Log a message at TRACE level with structured attributes.
    pub fn trace_with(&self, message: &str, fields: EventFields) {
        if self.enabled_for(Level::Trace) {
            self.emit(Level::Trace, message, fields, None);
        }
    }

    /// Log a message at DEBUG level.
    pub fn debug(&self, message: &str) {
        if self.enabled_for(Level::Debug) {
            self.emit(Level::Debug, message, EventFields::new(), None);
        }
    }

    /// Log a message at DEBUG level with structured attributes.
    pub fn debug_with(&self, message: &str, fields: EventFields) {
        if self.enabled_for(Level::Debug) {
            self.emit(Level::Debug, message, fields, None);
        }
    }

    /// Log a message at INFO level.
    pub fn info(&self, message: &str) {
        if self.enabled_for(Level::Info) {
            self.emit(Level::Info, message, EventFields::new(), None);
        }
    }

    /// Log a message at INFO level with structured attributes.
    pub fn info_with(&self, message: &str, fields: EventFields) {
        if self.enabled_for(Level::Info) {
            self.emit(Level::Info, message, fields, None);
        }
    }

    /// Log a message at WARN level.
    pub fn warn(&self, message: &str) {
        if self.enabled_for(Level::Warn) {
            self.emit(Level::Warn, message, EventFields::new(), None);
        }
    }

    /// Log a message at WARN level with structured attributes.
    pub fn warn_with(&self, message: &str, fields: EventFields) {
        if self.enabled_for(Level::Warn) {
            self.emit(Level::Warn, message, fields, None);
        }
    }

    /// Alias for [`warn`](Self::warn).
    pub fn warning(&self, message: &str) {
        self.warn(message);
    }

    /// Alias for [`warn_with`](Self::warn_with).
    pub fn warning_with(&self, message: &str, fields: EventFields) {
        self.warn_with(message, fields);
    }

    /// Log a message at ERROR level.
    pub fn error(&self, message: &str) {
        if self.enabled_for(Level::Error) {
            self.emit(Level::Error, message, EventFields::new(), None);
        }
    }

    /// Log a message at ERROR level with structured attributes.
    pub fn error_with(&self, message: &str, fields: EventFields) {
        if self.enabled_for(Level::Error) {
            self.emit(Level::Error, message, fields, None);
        }
    }

    /// Log a message at CRITICAL level.
    pub fn critical(&self, message: &str) {
        if self.enabled_for(Level::Critical) {
            self.emit(Level::Critical, message, EventFields::new(), None);
        }
    }

    /// Log a message at CRITICAL level with structured attributes.
    pub fn critical_with(&self, message: &str, fields: EventFields) {
        if self.enabled_for(Level::Critical) {
            self.emit(Level::Critical, message, fields, None);
        }
    }

    /// Log a message at ERROR level with the error's rendered source chain
    /// appended after the entry line.
    pub fn exception(&self, message: &str, error: &(dyn std::error::Error + 'static)) {
        self.exception_with(message, error, EventFields::new());
    }

    /// Like [`exception`](Self::exception), with structured attributes.
    pub fn exception_with(
        &self,
        message: &str,
        error: &(dyn std::error::Error + 'static),
        fields: EventFields,
    ) {
        if self.enabled_for(Level::Error) {
            let trace = format::render_error_chain(error);
            self.emit(Level::Error, message, fields, Some(trace));
        }
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &*self.level.read())
            .finish_non_exhaustive()
    }
}
