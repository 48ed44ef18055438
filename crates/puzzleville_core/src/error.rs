//! Engine error types.

use derive_more::{Display, Error, From};
use tracing::instrument;

/// Malformed level definition, detected while building a grid.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Level config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Requested level number has no definition in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Level {} not found (catalog has {} levels)", level, available)]
pub struct LevelNotFoundError {
    /// The level number asked for (1-based).
    pub level: usize,
    /// How many levels the catalog defines.
    pub available: usize,
}

impl LevelNotFoundError {
    /// True when the request is for the level right after the last one,
    /// which front ends treat as "every level cleared".
    pub fn is_one_past_end(&self) -> bool {
        self.level == self.available + 1
    }
}

/// Coordinate outside `[0, size)` on either axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Cell ({}, {}) is outside the {}x{} grid", row, col, size, size)]
pub struct OutOfBoundsError {
    /// Requested row.
    pub row: usize,
    /// Requested column.
    pub col: usize,
    /// Side length of the grid.
    pub size: usize,
}

/// Any failure the engine surfaces to its caller.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum EngineError {
    /// Level definition is malformed.
    #[display("{_0}")]
    Config(ConfigError),
    /// Level number is not in the catalog.
    #[display("{_0}")]
    LevelNotFound(LevelNotFoundError),
    /// Coordinate is off the grid.
    #[display("{_0}")]
    OutOfBounds(OutOfBoundsError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_records_location() {
        let err = ConfigError::new("bad start");
        assert_eq!(err.message, "bad start");
        assert!(err.file.ends_with(".rs"));
        assert!(err.line > 0);
        assert!(err.to_string().contains("bad start"));
    }

    #[test]
    fn test_one_past_end() {
        let err = LevelNotFoundError {
            level: 4,
            available: 3,
        };
        assert!(err.is_one_past_end());

        let err = LevelNotFoundError {
            level: 9,
            available: 3,
        };
        assert!(!err.is_one_past_end());

        let err = LevelNotFoundError {
            level: 0,
            available: 3,
        };
        assert!(!err.is_one_past_end());
    }

    #[test]
    fn test_engine_error_from_conversions() {
        let err: EngineError = OutOfBoundsError {
            row: 7,
            col: 1,
            size: 5,
        }
        .into();
        assert!(matches!(err, EngineError::OutOfBounds(_)));
        assert!(err.to_string().contains("(7, 1)"));
    }
}
