//! Logger registry and bulk operations
//!
//! The manager owns the name-to-logger mapping so level changes can be
//! applied across an application from one place. A process-wide instance
//! backs the crate-level `get_logger`/`set_level`/`disable`/`enable`
//! functions; independent instances exist only in tests.

use super::context::ContextProcessor;
use super::level::Level;
use super::logger::{Logger, SharedProcessors};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

static MANAGER: Lazy<Manager> = Lazy::new(Manager::new);

/// The process-wide registry.
pub fn global() -> &'static Manager {
    &MANAGER
}

/// Tracks logger instances by name and applies bulk operations to them.
///
/// Loggers created through the manager share its context processor list,
/// so registering a processor takes effect for existing loggers as well as
/// future ones.
pub struct Manager {
    level: RwLock<Level>,
    loggers: RwLock<HashMap<String, Arc<Logger>>>,
    processors: SharedProcessors,
}

impl Manager {
    /// Create a registry whose loggers default to the Debug level.
    #[must_use]
    pub fn new() -> Self {
        Self::with_level(Level::Debug)
    }

    /// Create a registry with an explicit default level for new loggers.
    #[must_use]
    pub fn with_level(level: Level) -> Self {
        Self {
            level: RwLock::new(level),
            loggers: RwLock::new(HashMap::new()),
            processors: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Look up the logger for `name`, creating and tracking it at the
    /// registry's current default level if it does not exist yet.
    pub fn get_logger(&self, name: &str) -> Arc<Logger> {
        if let Some(logger) = self.loggers.read().get(name) {
            return Arc::clone(logger);
        }

        let mut loggers = self.loggers.write();
        // Another thread may have created it between the two locks.
        let logger = loggers.entry(name.to_string()).or_insert_with(|| {
            Arc::new(Logger::with_processors(
                name,
                *self.level.read(),
                Arc::clone(&self.processors),
            ))
        });
        Arc::clone(logger)
    }

    /// The level applied to loggers created from now on.
    #[must_use]
    pub fn default_level(&self) -> Level {
        *self.level.read()
    }

    /// Set the level for every tracked logger and for loggers created
    /// later.
    pub fn set_level(&self, level: Level) {
        *self.level.write() = level;
        for logger in self.loggers.read().values() {
            logger.set_level(level);
        }
    }

    /// Disable the loggers whose name matches any of the given globs
    /// (`"worker.*"` style). An empty list disables every tracked logger.
    /// Reversed by [`enable`](Self::enable) with the same arguments.
    pub fn disable(&self, globs: &[&str]) {
        self.for_matching(globs, |logger| logger.disable());
    }

    /// Enable the loggers whose name matches any of the given globs,
    /// restoring each to its remembered level. An empty list enables every
    /// tracked logger. Already-enabled loggers are untouched.
    pub fn enable(&self, globs: &[&str]) {
        self.for_matching(globs, |logger| logger.enable());
    }

    fn for_matching(&self, globs: &[&str], apply: impl Fn(&Logger)) {
        let loggers = self.loggers.read();
        if globs.is_empty() {
            for logger in loggers.values() {
                apply(logger);
            }
            return;
        }

        for glob in globs {
            match glob::Pattern::new(glob) {
                Ok(pattern) => {
                    for (name, logger) in loggers.iter() {
                        if pattern.matches(name) {
                            apply(logger);
                        }
                    }
                }
                // A malformed pattern still selects its literal name.
                Err(_) => {
                    if let Some(logger) = loggers.get(*glob) {
                        apply(logger);
                    }
                }
            }
        }
    }

    /// Append a context processor to the shared list consulted by every
    /// logger during emission.
    pub fn add_processor(&self, processor: Arc<dyn ContextProcessor>) {
        self.processors.write().push(processor);
    }

    /// Number of tracked loggers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.loggers.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loggers.read().is_empty()
    }
}

impl Default for Manager {
    fn default() -> Self {
        Self::new()
    }
}
