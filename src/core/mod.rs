//! Core logging types and the emission pipeline

pub mod context;
pub mod error;
pub mod fields;
pub mod format;
pub mod level;
pub mod logger;
pub mod manager;

pub use context::{
    AttachGuard, ContextProcessor, NoopProcessor, ScopeGuard, ScopeProcessor, ScopeSnapshot,
};
pub use error::{LevelError, Result};
pub use fields::{EventFields, FieldValue};
pub use level::Level;
pub use logger::{Clock, Logger, Sink};
pub use manager::Manager;
