// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Update payloads the emulator publishes for browser sessions.
//!
//! Many emulator instances may share one bus; every payload carries the
//! emitting instance's [`EmulatorId`] so subscribers can demultiplex.

use std::fmt;

use panelkit::UpdateBus;
use serde::{Deserialize, Serialize};

use crate::config::EmulatorConfig;

/// Identity of one emulator instance among potentially many.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmulatorId(String);

impl EmulatorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmulatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EmulatorId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for EmulatorId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Channel/room name for routing one instance's updates to its sessions.
pub fn emulator_room(id: &EmulatorId) -> String {
    format!("emulator:{id}")
}

/// One cell's state in an update batch or full snapshot. `image: None` is
/// the "never drawn" sentinel, distinct from any drawn-but-blank payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmulatorImage {
    pub x: u32,
    pub y: u32,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EmulatorUpdate {
    /// The instance's configuration changed. Emitted only when the new
    /// value differs from the last one sent.
    Config {
        id: EmulatorId,
        config: EmulatorConfig,
    },
    /// A batch of changed cells. `clear_cache` tells subscribers to discard
    /// their local cache wholesale instead of applying a diff.
    Images {
        id: EmulatorId,
        images: Vec<EmulatorImage>,
        clear_cache: bool,
    },
}

pub type EmulatorUpdateBus = UpdateBus<EmulatorUpdate>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_name_is_namespaced_by_id() {
        assert_eq!(
            emulator_room(&EmulatorId::from("abc123")),
            "emulator:abc123"
        );
    }

    #[test]
    fn id_round_trips_through_serde() {
        let id = EmulatorId::from("emu1");
        let value = serde_json::to_value(&id).unwrap();
        assert_eq!(value, serde_json::json!("emu1"));
        let back: EmulatorId = serde_json::from_value(value).unwrap();
        assert_eq!(back, id);
    }
}
