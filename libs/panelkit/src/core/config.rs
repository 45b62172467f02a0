// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Configuration-field schema types.
//!
//! Each panel exposes a static list of [`ConfigField`]s describing its
//! editable settings. The surrounding system ships the list to the settings
//! UI and validates submitted values against it; panels themselves consume
//! it only for default-value derivation.

use serde::{Deserialize, Serialize};

/// Surface content rotation. `"-90"` is the counter-clockwise quarter turn
/// (equivalently 270° clockwise).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceRotation {
    #[default]
    #[serde(rename = "0")]
    Deg0,
    #[serde(rename = "90")]
    Deg90,
    #[serde(rename = "180")]
    Deg180,
    #[serde(rename = "-90")]
    DegMinus90,
}

/// One editable setting: its type, bounds, and default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigField {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    #[serde(flatten)]
    pub kind: ConfigFieldKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConfigFieldKind {
    Number {
        default: i64,
        min: i64,
        max: i64,
        step: i64,
    },
    Checkbox {
        default: bool,
    },
    Dropdown {
        default: String,
        choices: Vec<DropdownChoice>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropdownChoice {
    pub id: String,
    pub label: String,
}

impl ConfigField {
    pub fn number(id: &str, label: &str, default: i64, min: i64, max: i64) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            tooltip: None,
            kind: ConfigFieldKind::Number {
                default,
                min,
                max,
                step: 1,
            },
        }
    }

    pub fn checkbox(id: &str, label: &str, default: bool) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            tooltip: None,
            kind: ConfigFieldKind::Checkbox { default },
        }
    }

    pub fn with_tooltip(mut self, tooltip: &str) -> Self {
        self.tooltip = Some(tooltip.to_string());
        self
    }
}

/// Origin-shift fields shared by every grid surface.
pub fn offset_config_fields() -> Vec<ConfigField> {
    vec![
        ConfigField::number("offset_x", "Horizontal offset in grid", 0, -10000, 10000),
        ConfigField::number("offset_y", "Vertical offset in grid", 0, -10000, 10000),
    ]
}

/// Content rotation field shared by every grid surface.
pub fn rotation_config_field() -> ConfigField {
    ConfigField {
        id: "rotation".to_string(),
        label: "Surface rotation".to_string(),
        tooltip: None,
        kind: ConfigFieldKind::Dropdown {
            default: "0".to_string(),
            choices: vec![
                DropdownChoice {
                    id: "0".to_string(),
                    label: "Normal".to_string(),
                },
                DropdownChoice {
                    id: "-90".to_string(),
                    label: "90 CCW".to_string(),
                },
                DropdownChoice {
                    id: "90".to_string(),
                    label: "90 CW".to_string(),
                },
                DropdownChoice {
                    id: "180".to_string(),
                    label: "180".to_string(),
                },
            ],
        },
    }
}

/// PIN-lock behavior fields. Lock semantics live in the surface controller;
/// panels just carry the toggles.
pub fn lock_config_fields() -> Vec<ConfigField> {
    vec![ConfigField::checkbox(
        "never_lock",
        "Never lock this surface",
        false,
    )]
}
