// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

pub mod config;
pub mod debounce;
pub mod error;
pub mod events;
pub mod image;
pub mod surface;
