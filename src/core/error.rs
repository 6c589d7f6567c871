//! Error types for level normalization at the configuration boundary.

pub type Result<T> = std::result::Result<T, LevelError>;

/// Errors raised when normalizing a severity supplied by external
/// configuration or a foreign logging interface.
///
/// These only occur at setup time; the emission path has no recoverable
/// error surface.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LevelError {
    /// A level name that does not match any known severity.
    #[error("unknown level name: '{0}'")]
    UnknownName(String),

    /// A numeric rank outside the defined set of severities.
    #[error("level rank out of range: {0}")]
    InvalidRank(u8),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LevelError::UnknownName("verbose".to_string());
        assert_eq!(err.to_string(), "unknown level name: 'verbose'");

        let err = LevelError::InvalidRank(42);
        assert_eq!(err.to_string(), "level rank out of range: 42");
    }
}
