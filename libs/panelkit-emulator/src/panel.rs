// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::broadcast;

use panelkit::{
    Debouncer, GridSize, ImageResult, PanelEvent, SurfacePanel, SurfacePanelInfo,
};

use crate::config::{config_fields, EmulatorConfig};
use crate::events::{emulator_room, EmulatorId, EmulatorImage, EmulatorUpdate, EmulatorUpdateBus};

/// Quiet period before a burst of draws is flushed to subscribers.
const FLUSH_WAIT: Duration = Duration::from_millis(5);
/// Hard bound on how long a continuous draw stream can defer a flush.
const FLUSH_MAX_WAIT: Duration = Duration::from_millis(50);

/// Mutable state shared between the panel and its flush worker.
struct PanelState {
    last_sent_config: EmulatorConfig,
    /// Last rendered payload per cell. Discarded wholesale on resize: old
    /// coordinates may not map to the same physical cells afterwards, and a
    /// stale entry must never be served for a resized grid.
    image_cache: HashMap<(u32, u32), String>,
    /// Dirty cells awaiting the next flushed batch, keyed `(y, x)` so
    /// batches drain row-major like `latest_images`. The cache holds the
    /// latest payload; this set only records which coordinates the next
    /// batch must include.
    pending: BTreeSet<(u32, u32)>,
}

/// One emulated grid surface.
///
/// Draws land in the image cache and are published as coalesced
/// [`EmulatorUpdate::Images`] batches on the shared bus. Config changes are
/// published on deep inequality only, and a dimension change invalidates the
/// whole cache and raises a deferred [`PanelEvent::Resized`].
pub struct EmulatorPanel {
    id: EmulatorId,
    info: SurfacePanelInfo,
    updates: EmulatorUpdateBus,
    panel_events: broadcast::Sender<PanelEvent>,
    state: Arc<Mutex<PanelState>>,
    flush: Debouncer,
}

impl EmulatorPanel {
    /// Create a panel publishing on `updates`. Must be called from within a
    /// tokio runtime (the flush worker is spawned here).
    pub fn new(updates: EmulatorUpdateBus, id: EmulatorId) -> Self {
        let state = Arc::new(Mutex::new(PanelState {
            last_sent_config: EmulatorConfig::default(),
            image_cache: HashMap::new(),
            pending: BTreeSet::new(),
        }));

        let flush_state = Arc::clone(&state);
        let flush_updates = updates.clone();
        let flush_id = id.clone();
        let flush = Debouncer::new(FLUSH_WAIT, FLUSH_MAX_WAIT, move || {
            // Snapshot and clear in one critical section so a coordinate
            // written between the two can never be dropped.
            let images = {
                let mut state = flush_state.lock();
                let coords: Vec<(u32, u32)> = std::mem::take(&mut state.pending)
                    .into_iter()
                    .collect();
                coords
                    .into_iter()
                    .map(|(y, x)| EmulatorImage {
                        x,
                        y,
                        image: state.image_cache.get(&(x, y)).cloned(),
                    })
                    .collect::<Vec<_>>()
            };

            // Idempotent on an empty pending set.
            if images.is_empty() {
                return;
            }

            if flush_updates.listener_count() > 0 {
                flush_updates.emit(EmulatorUpdate::Images {
                    id: flush_id.clone(),
                    images,
                    clear_cache: false,
                });
            }
        });

        let (panel_events, _) = broadcast::channel(4);

        let info = SurfacePanelInfo {
            panel_type: "Emulator".to_string(),
            device_path: emulator_room(&id),
            device_id: emulator_room(&id),
            config_fields: config_fields(),
        };

        tracing::debug!("[EmulatorPanel] adding virtual surface {id}");

        Self {
            id,
            info,
            updates,
            panel_events,
            state,
            flush,
        }
    }

    pub fn id(&self) -> &EmulatorId {
        &self.id
    }

    pub fn info(&self) -> &SurfacePanelInfo {
        &self.info
    }

    /// Fresh copy of the built-in defaults; callers may mutate it freely.
    pub fn default_config(&self) -> EmulatorConfig {
        EmulatorConfig::default()
    }

    pub fn grid_size(&self) -> GridSize {
        self.state.lock().last_sent_config.grid_size()
    }

    pub fn latest_config(&self) -> EmulatorConfig {
        self.state.lock().last_sent_config.clone()
    }

    /// Full row-major snapshot at the current grid dimensions, with `None`
    /// for cells never drawn. This is what a freshly attached session pulls
    /// before it starts consuming diff batches.
    pub fn latest_images(&self) -> Vec<EmulatorImage> {
        let state = self.state.lock();
        let size = state.last_sent_config.grid_size();
        let mut images = Vec::with_capacity(size.cell_count());
        for y in 0..size.rows {
            for x in 0..size.columns {
                images.push(EmulatorImage {
                    x,
                    y,
                    image: state.image_cache.get(&(x, y)).cloned(),
                });
            }
        }
        images
    }

    /// Receiver for this panel's own notifications (`Resized`).
    pub fn subscribe_panel_events(&self) -> broadcast::Receiver<PanelEvent> {
        self.panel_events.subscribe()
    }

    /// Apply a configuration from the GUI / database.
    ///
    /// Zero dimensions take the defaults before anything else looks at the
    /// candidate. A `Config` update is published only when the (defaulted)
    /// candidate differs from the last one sent. A dimension change clears
    /// the image cache, marks the old grid's full rectangle pending, and
    /// schedules a `Resized` notification for after the caller's own
    /// synchronous continuation has run.
    pub fn set_config(&self, mut config: EmulatorConfig, _force: bool) {
        config.fill_grid_defaults();

        let mut state = self.state.lock();

        if self.updates.listener_count() > 0 && state.last_sent_config != config {
            self.updates.emit(EmulatorUpdate::Config {
                id: self.id.clone(),
                config: config.clone(),
            });
        }

        let old_size = state.last_sent_config.grid_size();
        if config.grid_size() != old_size {
            state.image_cache.clear();

            // Every previously-valid cell is now blank; queue the old
            // rectangle so subscribers learn that on the next flush.
            for y in 0..old_size.rows {
                for x in 0..old_size.columns {
                    state.pending.insert((y, x));
                }
            }

            let panel_events = self.panel_events.clone();
            tokio::spawn(async move {
                // Trigger the redraw after this call has completed.
                let _ = panel_events.send(PanelEvent::Resized);
            });
        }

        state.last_sent_config = config;
    }

    /// Draw one cell. Out-of-range coordinates (stale layout math) and
    /// payload-less renders are dropped without error.
    pub fn draw(&self, x: i32, y: i32, render: &ImageResult) {
        let mut state = self.state.lock();

        if !state.last_sent_config.grid_size().contains(x, y) {
            return;
        }

        let Some(data_url) = render.as_data_url() else {
            tracing::debug!("[EmulatorPanel] draw call had no image data");
            return;
        };

        let (x, y) = (x as u32, y as u32);
        state.image_cache.insert((x, y), data_url.to_string());
        state.pending.insert((y, x));
        drop(state);

        self.flush.call();
    }

    /// Blank the surface: drop the whole cache and tell subscribers to do
    /// the same, immediately rather than debounced. An already-armed flush
    /// is left alone; it will emit a redundant blank batch, which
    /// subscribers tolerate.
    pub fn clear_deck(&self) {
        tracing::trace!("[EmulatorPanel] clear_deck");

        self.state.lock().image_cache.clear();

        if self.updates.listener_count() > 0 {
            self.updates.emit(EmulatorUpdate::Images {
                id: self.id.clone(),
                images: Vec::new(),
                clear_cache: true,
            });
        }
    }

    /// Lifecycle symmetry with hardware panels; nothing to release here.
    pub fn quit(&self) {}
}

impl SurfacePanel for EmulatorPanel {
    fn info(&self) -> &SurfacePanelInfo {
        &self.info
    }

    fn grid_size(&self) -> GridSize {
        EmulatorPanel::grid_size(self)
    }

    fn set_config_json(&self, config: &Value, force: bool) {
        match EmulatorConfig::from_value(config) {
            Ok(config) => self.set_config(config, force),
            Err(err) => {
                tracing::warn!("[EmulatorPanel] dropping malformed config: {err}");
            }
        }
    }

    fn draw(&self, x: i32, y: i32, render: &ImageResult) {
        EmulatorPanel::draw(self, x, y, render);
    }

    fn clear_deck(&self) {
        EmulatorPanel::clear_deck(self);
    }

    fn quit(&self) {
        EmulatorPanel::quit(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn info_routes_through_the_emulator_room() {
        let bus = EmulatorUpdateBus::new(16);
        let panel = EmulatorPanel::new(bus, EmulatorId::from("emu1"));

        assert_eq!(panel.info().panel_type, "Emulator");
        assert_eq!(panel.info().device_path, "emulator:emu1");
        assert_eq!(panel.info().device_id, "emulator:emu1");
        assert!(!panel.info().config_fields.is_empty());
    }

    #[tokio::test]
    async fn default_config_is_an_independent_copy() {
        let bus = EmulatorUpdateBus::new(16);
        let panel = EmulatorPanel::new(bus, EmulatorId::from("emu1"));

        let mut copy = panel.default_config();
        copy.rows = 99;
        assert_eq!(panel.default_config().rows, crate::config::DEFAULT_ROWS);
        assert_eq!(panel.latest_config().rows, crate::config::DEFAULT_ROWS);
    }

    #[tokio::test]
    async fn quit_is_a_noop() {
        let bus = EmulatorUpdateBus::new(16);
        let panel = EmulatorPanel::new(bus, EmulatorId::from("emu1"));

        panel.quit();
        assert_eq!(panel.grid_size(), GridSize::new(4, 8));
    }
}
