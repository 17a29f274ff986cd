//! Engine configuration: operating window, fallback rooms, and range defaults.
//!
//! Every field has a default, so an empty JSON object `{}` is a valid config.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::window::OperatingWindow;

/// Label the feed supplier uses when it could not extract a room.
pub const UNKNOWN_ROOM: &str = "Unknown Room";

/// Days added to "today" when the caller gives no range end.
pub const DEFAULT_SPAN_DAYS: u32 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub window: OperatingWindow,
    /// Rooms shown when no booking names a known room.
    pub default_rooms: Vec<String>,
    /// Sentinel label excluded from room enumeration.
    pub unknown_room: String,
    pub default_span_days: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window: OperatingWindow::default(),
            default_rooms: ["Room 214", "Room 215", "Room 216", "Room 217", "Room 218"]
                .iter()
                .map(|r| r.to_string())
                .collect(),
            unknown_room: UNKNOWN_ROOM.to_string(),
            default_span_days: DEFAULT_SPAN_DAYS,
        }
    }
}

impl EngineConfig {
    /// Parse a JSON config and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.window.validate()?;
        if self.default_rooms.is_empty() {
            return Err(EngineError::Config("default_rooms must not be empty".to_string()));
        }
        if self.default_rooms.iter().any(|r| *r == self.unknown_room) {
            return Err(EngineError::Config(format!(
                "default_rooms must not contain the unknown-room label '{}'",
                self.unknown_room
            )));
        }
        Ok(())
    }
}
