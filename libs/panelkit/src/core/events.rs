// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Outward fan-out channel for panel updates.
//!
//! Panels publish, web/RPC sessions subscribe. One bus may be shared by many
//! panel instances; every payload type carries the emitting instance's
//! identity so subscribers can demultiplex. Delivery is fire-and-forget: a
//! lagging subscriber loses old updates (it re-queries the panel's full
//! snapshot), and publishing with no subscribers drops the update.

use tokio::sync::broadcast;

/// Cloneable handle to a shared broadcast channel of update payloads.
pub struct UpdateBus<T> {
    tx: broadcast::Sender<T>,
}

impl<T: Clone> UpdateBus<T> {
    /// `capacity` bounds how far a subscriber may lag before it starts
    /// missing updates.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<T> {
        self.tx.subscribe()
    }

    /// Number of live subscribers. Publishers use this to skip building
    /// payloads nobody will see.
    pub fn listener_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Publish an update. Returns `true` if at least one subscriber
    /// received it.
    pub fn emit(&self, update: T) -> bool {
        match self.tx.send(update) {
            Ok(_) => true,
            Err(_) => {
                tracing::trace!("[UpdateBus] dropped update with no subscribers");
                false
            }
        }
    }
}

impl<T> Clone for UpdateBus<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn emit_without_subscribers_is_dropped() {
        let bus: UpdateBus<String> = UpdateBus::new(4);
        assert_eq!(bus.listener_count(), 0);
        assert!(!bus.emit("lost".to_string()));
    }

    #[tokio::test]
    async fn subscribers_receive_updates() {
        let bus: UpdateBus<String> = UpdateBus::new(4);
        let mut rx = bus.subscribe();
        assert_eq!(bus.listener_count(), 1);

        assert!(bus.emit("hello".to_string()));
        assert_eq!(rx.recv().await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn clones_share_the_channel() {
        let bus: UpdateBus<u32> = UpdateBus::new(4);
        let publisher = bus.clone();
        let mut rx = bus.subscribe();

        assert!(publisher.emit(7));
        assert_eq!(rx.recv().await.unwrap(), 7);
    }

    #[tokio::test]
    async fn late_subscriber_misses_earlier_updates() {
        let bus: UpdateBus<u32> = UpdateBus::new(4);
        bus.emit(1);

        let mut rx = bus.subscribe();
        bus.emit(2);

        assert_eq!(rx.recv().await.unwrap(), 2);
        assert!(rx.try_recv().is_err());
    }
}
