//! Interop with the conventional `log` facade

pub mod std_log;

pub use std_log::{
    install, install_with_max_level, map_severity, normalize_severity, set_logger_severity,
    LogProxy,
};
