// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Encoded render payloads handed to `SurfacePanel::draw`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Result of rendering one cell, as produced by the graphics pipeline.
///
/// The payload is an encoded `data:` URL, or nothing at all — a blank result
/// means "nothing to draw", which panels treat as a no-op rather than an
/// error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageResult {
    data_url: Option<String>,
}

impl ImageResult {
    /// A render with no payload.
    pub fn blank() -> Self {
        Self { data_url: None }
    }

    /// Wrap an already-encoded `data:` URL.
    pub fn from_data_url(url: impl Into<String>) -> Self {
        Self {
            data_url: Some(url.into()),
        }
    }

    /// Build a `data:` URL from an encoded image buffer (e.g. PNG bytes).
    pub fn from_encoded(mime: &str, bytes: &[u8]) -> Self {
        Self {
            data_url: Some(format!("data:{mime};base64,{}", STANDARD.encode(bytes))),
        }
    }

    pub fn as_data_url(&self) -> Option<&str> {
        self.data_url.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_has_no_payload() {
        assert_eq!(ImageResult::blank().as_data_url(), None);
        assert_eq!(ImageResult::default(), ImageResult::blank());
    }

    #[test]
    fn from_data_url_passes_through() {
        let render = ImageResult::from_data_url("data:image/png;base64,AAAA");
        assert_eq!(render.as_data_url(), Some("data:image/png;base64,AAAA"));
    }

    #[test]
    fn from_encoded_builds_a_data_url() {
        let render = ImageResult::from_encoded("image/png", b"abc");
        assert_eq!(render.as_data_url(), Some("data:image/png;base64,YWJj"));
    }
}
