//! Engine behavior switches.

use derive_setters::Setters;
use serde::{Deserialize, Serialize};

/// Rule switches for a level attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Setters)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct EngineConfig {
    /// Give the replaced tile back to the supply when a new tile is
    /// placed over it. Off by default: overwriting costs a tile.
    pub refund_replaced_tiles: bool,
}
