//! Log level definitions

use super::error::LevelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log event, ordered by integer rank.
///
/// Lower rank means more verbose. A logger emits an event when its own
/// threshold rank is less than or equal to the event's rank, so the two
/// sentinel values above `Critical` filter everything without any extra
/// code path on the emission side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[repr(u8)]
pub enum Level {
    Trace = 0,
    #[default]
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Critical = 5,
    /// Threshold mapped from an unrecognized custom severity. Filters every
    /// event, but remains distinguishable from a deliberate [`Level::Disabled`]
    /// for tooling that inspects logger state.
    Unmapped = 90,
    /// Sentinel above every real severity; a logger at this threshold emits
    /// nothing.
    Disabled = 99,
}

impl Level {
    /// Integer rank used for threshold comparisons.
    #[inline]
    #[must_use]
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// The name rendered in the `level='...'` output field.
    ///
    /// The sentinel names never appear in emitted output since no emission
    /// method carries them; they exist for diagnostics only.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Critical => "critical",
            Level::Unmapped => "unmapped",
            Level::Disabled => "disabled",
        }
    }

    /// Whether this is one of the six real severities, as opposed to a
    /// sentinel threshold.
    #[must_use]
    pub fn is_severity(self) -> bool {
        self.rank() <= Level::Critical.rank()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Level {
    type Err = LevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Level::Trace),
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "critical" => Ok(Level::Critical),
            _ => Err(LevelError::UnknownName(s.to_string())),
        }
    }
}

impl TryFrom<u8> for Level {
    type Error = LevelError;

    fn try_from(rank: u8) -> Result<Self, LevelError> {
        match rank {
            0 => Ok(Level::Trace),
            1 => Ok(Level::Debug),
            2 => Ok(Level::Info),
            3 => Ok(Level::Warn),
            4 => Ok(Level::Error),
            5 => Ok(Level::Critical),
            90 => Ok(Level::Unmapped),
            99 => Ok(Level::Disabled),
            other => Err(LevelError::InvalidRank(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_ordering() {
        assert!(Level::Trace < Level::Debug);
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
        assert!(Level::Error < Level::Critical);
        assert!(Level::Critical < Level::Unmapped);
        assert!(Level::Unmapped < Level::Disabled);
    }

    #[test]
    fn test_as_str() {
        assert_eq!(Level::Trace.as_str(), "trace");
        assert_eq!(Level::Debug.as_str(), "debug");
        assert_eq!(Level::Info.as_str(), "info");
        assert_eq!(Level::Warn.as_str(), "warn");
        assert_eq!(Level::Error.as_str(), "error");
        assert_eq!(Level::Critical.as_str(), "critical");
    }

    #[test]
    fn test_parse_known_names() {
        assert_eq!("trace".parse::<Level>().unwrap(), Level::Trace);
        assert_eq!("INFO".parse::<Level>().unwrap(), Level::Info);
        assert_eq!("warning".parse::<Level>().unwrap(), Level::Warn);
        assert_eq!("Warn".parse::<Level>().unwrap(), Level::Warn);
        assert_eq!("critical".parse::<Level>().unwrap(), Level::Critical);
    }

    #[test]
    fn test_parse_unknown_name() {
        let err = "verbose".parse::<Level>().unwrap_err();
        assert_eq!(err, LevelError::UnknownName("verbose".to_string()));
    }

    #[test]
    fn test_try_from_rank() {
        assert_eq!(Level::try_from(0).unwrap(), Level::Trace);
        assert_eq!(Level::try_from(5).unwrap(), Level::Critical);
        assert_eq!(Level::try_from(90).unwrap(), Level::Unmapped);
        assert_eq!(Level::try_from(99).unwrap(), Level::Disabled);
        assert_eq!(Level::try_from(6).unwrap_err(), LevelError::InvalidRank(6));
    }

    #[test]
    fn test_is_severity() {
        assert!(Level::Trace.is_severity());
        assert!(Level::Critical.is_severity());
        assert!(!Level::Unmapped.is_severity());
        assert!(!Level::Disabled.is_severity());
    }

    #[test]
    fn test_default_is_debug() {
        assert_eq!(Level::default(), Level::Debug);
    }
}
