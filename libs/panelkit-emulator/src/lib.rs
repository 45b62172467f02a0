// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Virtual grid-surface emulator panel.
//!
//! Models one emulated rows×columns control surface the way the surface
//! controller sees any panel: it accepts `draw` / `set_config` /
//! `clear_deck` / `quit`, caches the last-rendered image per cell, and
//! publishes coalesced update batches on a shared [`EmulatorUpdateBus`] so
//! browser sessions mirroring the surface stay current without a render
//! storm. The emulator is a best-effort presentation cache, not a source of
//! truth: bad input is dropped, never surfaced.

mod config;
mod events;
mod panel;

pub use config::{config_fields, EmulatorConfig, DEFAULT_COLUMNS, DEFAULT_ROWS};
pub use events::{emulator_room, EmulatorId, EmulatorImage, EmulatorUpdate, EmulatorUpdateBus};
pub use panel::EmulatorPanel;
