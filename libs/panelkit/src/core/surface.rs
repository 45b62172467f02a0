// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! The capability surface shared by every panel implementation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::config::ConfigField;
use super::image::ImageResult;

/// Logical button layout of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub rows: u32,
    pub columns: u32,
}

impl GridSize {
    pub fn new(rows: u32, columns: u32) -> Self {
        Self { rows, columns }
    }

    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.columns as usize
    }

    /// Whether `(x, y)` addresses a cell inside `[0, columns) × [0, rows)`.
    /// Takes signed coordinates so stale layout math cannot wrap around.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.columns && (y as u32) < self.rows
    }
}

/// Static descriptor the surface controller keeps per registered panel.
#[derive(Debug, Clone)]
pub struct SurfacePanelInfo {
    pub panel_type: String,
    pub device_path: String,
    pub device_id: String,
    pub config_fields: Vec<ConfigField>,
}

/// Notifications a panel raises about itself (as opposed to the update bus,
/// which carries payloads for downstream clients).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    /// The grid dimensions changed; observers should re-query `grid_size`
    /// and pull a fresh full-state snapshot.
    Resized,
}

/// Common capability set for hardware and virtual surfaces.
///
/// Every operation is infallible: panels are best-effort presentation
/// adapters sitting behind an already-validated configuration pipeline, so
/// bad input is dropped (and at most logged), never surfaced to the caller.
pub trait SurfacePanel: Send + Sync {
    fn info(&self) -> &SurfacePanelInfo;

    fn grid_size(&self) -> GridSize;

    /// Apply a configuration delivered as schema-validated JSON. Malformed
    /// values are logged and dropped.
    fn set_config_json(&self, config: &Value, force: bool);

    /// Draw one cell. Out-of-range coordinates and empty renders are no-ops.
    fn draw(&self, x: i32, y: i32, render: &ImageResult);

    /// Blank the whole surface.
    fn clear_deck(&self);

    /// Lifecycle teardown hook. Panels without external handles may no-op.
    fn quit(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_contains_rejects_out_of_range() {
        let size = GridSize::new(4, 8);
        assert!(size.contains(0, 0));
        assert!(size.contains(7, 3));
        assert!(!size.contains(8, 0));
        assert!(!size.contains(0, 4));
        assert!(!size.contains(-1, 0));
        assert!(!size.contains(0, -1));
    }

    #[test]
    fn grid_cell_count() {
        assert_eq!(GridSize::new(4, 8).cell_count(), 32);
        assert_eq!(GridSize::new(1, 1).cell_count(), 1);
    }
}
