//! Logging macros with `key = value` attribute syntax.
//!
//! The macros are thin sugar over the per-level logger methods: the level
//! check still happens first inside the method, so a filtered call costs a
//! single threshold comparison.
//!
//! # Examples
//!
//! ```
//! use podlog::{info, warn, Logger, Level};
//!
//! let logger = Logger::with_level("server", Level::Info);
//!
//! info!(logger, "server started");
//! info!(logger, "listening", port = 8080, tls = false);
//! warn!(logger, "low disk space", free_mb = 512);
//! ```

/// Build an [`EventFields`](crate::EventFields) set from `key = value`
/// pairs.
///
/// # Examples
///
/// ```
/// use podlog::fields;
///
/// let attrs = fields!(user_id = 42, action = "login");
/// assert_eq!(attrs.len(), 2);
/// ```
#[macro_export]
macro_rules! fields {
    () => { $crate::EventFields::new() };
    ($($key:ident = $value:expr),+ $(,)?) => {{
        let mut fields = $crate::EventFields::new();
        $( fields.add_field(stringify!($key), $value); )+
        fields
    }};
}

/// Log a trace-level message, optionally with attributes.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $msg:expr $(,)?) => {
        $logger.trace($msg)
    };
    ($logger:expr, $msg:expr, $($key:ident = $value:expr),+ $(,)?) => {
        $logger.trace_with($msg, $crate::fields!($($key = $value),+))
    };
}

/// Log a debug-level message, optionally with attributes.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $msg:expr $(,)?) => {
        $logger.debug($msg)
    };
    ($logger:expr, $msg:expr, $($key:ident = $value:expr),+ $(,)?) => {
        $logger.debug_with($msg, $crate::fields!($($key = $value),+))
    };
}

/// Log an info-level message, optionally with attributes.
///
/// # Examples
///
/// ```
/// # use podlog::{info, Logger};
/// # let logger = Logger::new("demo");
/// info!(logger, "cache warmed", entries = 1024);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $msg:expr $(,)?) => {
        $logger.info($msg)
    };
    ($logger:expr, $msg:expr, $($key:ident = $value:expr),+ $(,)?) => {
        $logger.info_with($msg, $crate::fields!($($key = $value),+))
    };
}

/// Log a warn-level message, optionally with attributes.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $msg:expr $(,)?) => {
        $logger.warn($msg)
    };
    ($logger:expr, $msg:expr, $($key:ident = $value:expr),+ $(,)?) => {
        $logger.warn_with($msg, $crate::fields!($($key = $value),+))
    };
}

/// Log an error-level message, optionally with attributes.
#[macro_export]
macro_rules! error {
    ($logger:expr, $msg:expr $(,)?) => {
        $logger.error($msg)
    };
    ($logger:expr, $msg:expr, $($key:ident = $value:expr),+ $(,)?) => {
        $logger.error_with($msg, $crate::fields!($($key = $value),+))
    };
}

/// Log a critical-level message, optionally with attributes.
#[macro_export]
macro_rules! critical {
    ($logger:expr, $msg:expr $(,)?) => {
        $logger.critical($msg)
    };
    ($logger:expr, $msg:expr, $($key:ident = $value:expr),+ $(,)?) => {
        $logger.critical_with($msg, $crate::fields!($($key = $value),+))
    };
}

/// Log an error-level message with an error's source chain appended.
///
/// # Examples
///
/// ```
/// # use podlog::{exception, Logger};
/// # let logger = Logger::new("demo");
/// let err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
/// exception!(logger, "request failed", &err, attempt = 3);
/// ```
#[macro_export]
macro_rules! exception {
    ($logger:expr, $msg:expr, $err:expr $(,)?) => {
        $logger.exception($msg, $err)
    };
    ($logger:expr, $msg:expr, $err:expr, $($key:ident = $value:expr),+ $(,)?) => {
        $logger.exception_with($msg, $err, $crate::fields!($($key = $value),+))
    };
}

/// Get the registry logger for the current module path, or for an explicit
/// name.
///
/// # Examples
///
/// ```
/// let logger = podlog::logger!();
///
/// let named = podlog::logger!("api.gateway");
/// assert_eq!(named.name(), "api.gateway");
/// ```
#[macro_export]
macro_rules! logger {
    () => {
        $crate::get_logger(module_path!())
    };
    ($name:expr) => {
        $crate::get_logger($name)
    };
}
