//! Player settings loaded from a TOML file.

use derive_getters::Getters;
use derive_more::{Display, Error};
use puzzleville_core::EngineConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Preferences for an interactive session. Every field is optional in
/// the file and falls back to its default.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Level to open with, 1-based.
    starting_level: usize,

    /// Print the winning route after a level is completed.
    show_route: bool,

    /// Answer the `hint` command.
    show_hints: bool,

    /// Engine rules.
    engine: EngineConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            starting_level: 1,
            show_route: true,
            show_hints: true,
            engine: EngineConfig::default(),
        }
    }
}

impl Settings {
    /// Loads settings from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        debug!("Loading settings from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| SettingsError::new(format!("Failed to read settings file: {}", e)))?;

        let settings: Self = toml::from_str(&content)
            .map_err(|e| SettingsError::new(format!("Failed to parse settings: {}", e)))?;

        if settings.starting_level == 0 {
            return Err(SettingsError::new("starting_level counts from 1"));
        }

        info!(
            starting_level = settings.starting_level,
            refund = settings.engine.refund_replaced_tiles,
            "Settings loaded"
        );
        Ok(settings)
    }
}

/// Settings error.
#[derive(Debug, Clone, Display, Error)]
#[display("Settings error: {} at {}:{}", message, file, line)]
pub struct SettingsError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SettingsError {
    /// Creates a new settings error.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(*settings.starting_level(), 1);
        assert!(*settings.show_route());
        assert!(*settings.show_hints());
        assert!(!settings.engine().refund_replaced_tiles);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings: Settings = toml::from_str("show_hints = false").unwrap();
        assert!(!*settings.show_hints());
        assert_eq!(*settings.starting_level(), 1);
    }

    #[test]
    fn test_engine_table() {
        let settings: Settings =
            toml::from_str("[engine]\nrefund_replaced_tiles = true\n").unwrap();
        assert!(settings.engine().refund_replaced_tiles);
    }
}
