// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PanelError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Config deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation not supported: {0}")]
    NotSupported(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, PanelError>;
