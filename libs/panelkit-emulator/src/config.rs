// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use panelkit::{
    lock_config_fields, offset_config_fields, rotation_config_field, ConfigField, GridSize,
    SurfaceRotation,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_ROWS: u32 = 4;
pub const DEFAULT_COLUMNS: u32 = 8;

/// Per-instance emulator settings, as persisted by the surface controller
/// and edited through the [`config_fields`] schema.
///
/// Deserialization is permissive: unknown fields are ignored and missing
/// fields take their defaults, since input arrives schema-validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmulatorConfig {
    pub rows: u32,
    pub columns: u32,
    pub offset_x: i32,
    pub offset_y: i32,
    pub rotation: SurfaceRotation,
    /// PIN-lock opt-out; semantics live in the surface controller.
    pub never_lock: bool,
    /// Accept input from Logitech R400 / Mastercue / DSan style remotes.
    pub control_enable: bool,
    /// UI hint only: offer to enter fullscreen when the emulator page opens.
    pub prompt_fullscreen: bool,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            offset_x: 0,
            offset_y: 0,
            rotation: SurfaceRotation::Deg0,
            never_lock: false,
            control_enable: true,
            prompt_fullscreen: true,
        }
    }
}

impl EmulatorConfig {
    pub fn from_value(value: &Value) -> panelkit::Result<Self> {
        Ok(serde_json::from_value(value.clone())?)
    }

    pub fn grid_size(&self) -> GridSize {
        GridSize::new(self.rows, self.columns)
    }

    /// A zero-sized grid is never stored; zero (the serde default for a
    /// missing dimension) falls back to the built-in default.
    pub(crate) fn fill_grid_defaults(&mut self) {
        if self.rows == 0 {
            self.rows = DEFAULT_ROWS;
        }
        if self.columns == 0 {
            self.columns = DEFAULT_COLUMNS;
        }
    }
}

/// Editable-field schema for one emulator instance.
pub fn config_fields() -> Vec<ConfigField> {
    let mut fields = vec![
        ConfigField::number("rows", "Row count", DEFAULT_ROWS as i64, 1, 100),
        ConfigField::number("columns", "Column count", DEFAULT_COLUMNS as i64, 1, 100),
    ];
    fields.extend(offset_config_fields());
    fields.push(rotation_config_field());
    fields.push(ConfigField::checkbox(
        "control_enable",
        "Enable support for Logitech R400/Mastercue/DSan",
        true,
    ));
    fields.push(ConfigField::checkbox(
        "prompt_fullscreen",
        "Prompt to enter fullscreen",
        true,
    ));
    fields.extend(lock_config_fields());
    fields
}
