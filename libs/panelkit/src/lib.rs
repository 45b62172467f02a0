// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Core abstractions shared by every surface panel implementation.
//!
//! A *panel* is one physical or virtual control surface: a rows×columns grid
//! of drawable cells behind a common capability set (`draw`, `set_config`,
//! `clear_deck`, `quit`). Panel implementations live in their own adapter
//! crates (e.g. `panelkit-emulator`); this crate owns the pieces they share:
//!
//! - [`SurfacePanel`] — the capability trait the surface controller drives
//! - [`UpdateBus`] — the outward fan-out channel panels publish updates on
//! - [`ConfigField`] — the schema describing a panel's editable settings
//! - [`ImageResult`] — an encoded render payload handed to `draw`
//! - [`Debouncer`] — trailing-edge coalescing timer with a max-wait bound

pub mod core;

pub use crate::core::config::{
    lock_config_fields, offset_config_fields, rotation_config_field, ConfigField, ConfigFieldKind,
    SurfaceRotation,
};
pub use crate::core::debounce::Debouncer;
pub use crate::core::error::{PanelError, Result};
pub use crate::core::events::UpdateBus;
pub use crate::core::image::ImageResult;
pub use crate::core::surface::{GridSize, PanelEvent, SurfacePanel, SurfacePanelInfo};
