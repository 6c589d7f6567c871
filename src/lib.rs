//! # podlog
//!
//! Optimized, opinionated structured logging for containerized services.
//!
//! ## Features
//!
//! - **Fast filtered path**: a call below the logger's threshold costs one
//!   comparison and returns
//! - **Deterministic output**: one stable `key='value'` line per event,
//!   routed to stdout or stderr by severity
//! - **Ambient context**: per-unit-of-work key-value scopes merged into
//!   every event without threading a context object through call signatures
//! - **Facade interop**: acts as the backend for the conventional `log`
//!   crate facade to capture third-party logging
//!
//! ## Example
//!
//! ```
//! use podlog::{fields, get_logger, Level};
//!
//! let logger = get_logger("service.worker");
//! logger.set_level(Level::Info);
//!
//! logger.info("service started");
//! logger.info_with("request handled", fields!(path = "/healthz", status = 200));
//! ```
//!
//! ## Ambient context
//!
//! ```
//! use podlog::context;
//!
//! podlog::enable_context();
//!
//! context::bind("request_id", "abc123");
//! // Every event emitted by this unit of work now carries request_id.
//!
//! let snapshot = context::snapshot();
//! std::thread::spawn(move || {
//!     let _scope = snapshot.attach();
//!     // This worker sees request_id; its own binds stay invisible to
//!     // the parent.
//! })
//! .join()
//! .unwrap();
//! # context::clear();
//! ```

pub mod core;
pub mod macros;
pub mod proxy;

use std::sync::Arc;

pub use self::core::context;
pub use self::core::{
    AttachGuard, Clock, ContextProcessor, EventFields, FieldValue, Level, LevelError, Logger,
    Manager, NoopProcessor, Result, ScopeGuard, ScopeProcessor, ScopeSnapshot, Sink,
};
pub use self::proxy::LogProxy;

pub mod prelude {
    pub use crate::core::{
        ContextProcessor, EventFields, FieldValue, Level, LevelError, Logger, Manager,
        ScopeProcessor, ScopeSnapshot, Sink,
    };
    pub use crate::proxy::LogProxy;
}

/// Get the tracked logger for the given name, creating it at the registry's
/// current default level if it does not exist yet.
///
/// Use the [`logger!`](crate::logger) macro to default the name to the
/// calling module path.
pub fn get_logger(name: &str) -> Arc<Logger> {
    core::manager::global().get_logger(name)
}

/// Set the logging level for every tracked logger, and for loggers created
/// later.
pub fn set_level(level: Level) {
    core::manager::global().set_level(level);
}

/// Disable the tracked loggers whose name matches any of the given globs
/// (e.g. `"worker.*"`); with no globs, disable all of them. Reversed by
/// [`enable`] with the same arguments.
pub fn disable(globs: &[&str]) {
    core::manager::global().disable(globs);
}

/// Enable the tracked loggers whose name matches any of the given globs,
/// restoring each to its remembered level; with no globs, enable all of
/// them.
pub fn enable(globs: &[&str]) {
    core::manager::global().enable(globs);
}

/// Register the scope-backed context processor so ambient
/// [`context`] bindings are merged into every event.
pub fn enable_context() {
    core::manager::global().add_processor(Arc::new(ScopeProcessor));
}

/// One-call configuration, applied in the order: enable globs, disable
/// globs, level, context.
///
/// # Example
///
/// ```
/// use podlog::{Level, Setup};
///
/// Setup::new()
///     .disable(&["noisy.dependency.*"])
///     .level(Level::Info)
///     .with_context()
///     .apply();
/// ```
#[derive(Debug, Default)]
pub struct Setup {
    enable: Vec<String>,
    disable: Vec<String>,
    level: Option<Level>,
    with_context: bool,
}

impl Setup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Logger name globs to enable.
    #[must_use]
    pub fn enable(mut self, globs: &[&str]) -> Self {
        self.enable.extend(globs.iter().map(|s| s.to_string()));
        self
    }

    /// Logger name globs to disable.
    #[must_use]
    pub fn disable(mut self, globs: &[&str]) -> Self {
        self.disable.extend(globs.iter().map(|s| s.to_string()));
        self
    }

    /// The global level to set.
    #[must_use]
    pub fn level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    /// Register the ambient context processor.
    #[must_use]
    pub fn with_context(mut self) -> Self {
        self.with_context = true;
        self
    }

    pub fn apply(self) {
        if !self.enable.is_empty() {
            let globs: Vec<&str> = self.enable.iter().map(String::as_str).collect();
            enable(&globs);
        }
        if !self.disable.is_empty() {
            let globs: Vec<&str> = self.disable.iter().map(String::as_str).collect();
            disable(&globs);
        }
        if let Some(level) = self.level {
            set_level(level);
        }
        if self.with_context {
            enable_context();
        }
    }
}
