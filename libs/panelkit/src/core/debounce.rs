// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Trailing-edge coalescing timer.
//!
//! Repeated [`Debouncer::call`]s within the quiet window collapse into one
//! flush after the burst goes quiet. A hard deadline of `max_wait` from the
//! first trigger of a burst bounds how long a continuous trigger stream can
//! defer the flush, so observers are never starved indefinitely.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

/// Handle to a debounced flush callback running on the tokio runtime.
///
/// The timer is re-armed (extended), never cancelled, on each new trigger.
/// Dropping the handle aborts the worker without a final flush.
pub struct Debouncer {
    trigger: mpsc::UnboundedSender<()>,
    worker: JoinHandle<()>,
}

impl Debouncer {
    /// Spawn the flush worker. Must be called from within a tokio runtime.
    pub fn new<F>(wait: Duration, max_wait: Duration, mut flush: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let (trigger, mut rx) = mpsc::unbounded_channel::<()>();
        let worker = tokio::spawn(async move {
            // Outer loop: idle until the first trigger of a burst.
            while rx.recv().await.is_some() {
                let hard_deadline = Instant::now() + max_wait;
                let mut quiet_deadline = Instant::now() + wait;
                loop {
                    let deadline = quiet_deadline.min(hard_deadline);
                    tokio::select! {
                        _ = time::sleep_until(deadline) => {
                            flush();
                            break;
                        }
                        msg = rx.recv() => match msg {
                            Some(()) => quiet_deadline = Instant::now() + wait,
                            // Sender dropped mid-burst: no trailing flush.
                            None => return,
                        },
                    }
                }
            }
        });
        Self { trigger, worker }
    }

    /// Record a trigger. Arms the timer, or extends the quiet period of an
    /// in-progress burst. Never flushes on the leading edge.
    pub fn call(&self) {
        let _ = self.trigger.send(());
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.worker.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::time::sleep;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn counting_debouncer(wait: u64, max_wait: u64) -> (Debouncer, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let debouncer = Debouncer::new(ms(wait), ms(max_wait), move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
        (debouncer, count)
    }

    #[tokio::test(start_paused = true)]
    async fn single_trigger_flushes_once_after_quiet_period() {
        let (debouncer, count) = counting_debouncer(5, 50);

        debouncer.call();
        // Trailing edge only: nothing fires synchronously.
        assert_eq!(count.load(Ordering::SeqCst), 0);

        sleep(ms(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        sleep(ms(100)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn triggers_within_the_window_coalesce() {
        let (debouncer, count) = counting_debouncer(5, 50);

        debouncer.call();
        debouncer.call();
        debouncer.call();
        sleep(ms(10)).await;

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn new_trigger_extends_the_quiet_period() {
        let (debouncer, count) = counting_debouncer(5, 50);

        debouncer.call();
        sleep(ms(3)).await;
        debouncer.call();
        sleep(ms(3)).await;
        // t=6: the first deadline (t=5) was extended to t=8 by the second
        // trigger, so no flush yet.
        assert_eq!(count.load(Ordering::SeqCst), 0);

        sleep(ms(5)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn continuous_triggers_hit_the_max_wait_deadline() {
        let (debouncer, count) = counting_debouncer(5, 50);

        // Trigger every 3ms for 90ms: the quiet period never elapses, so the
        // burst flushes at the hard deadline (t=50) and the remainder flushes
        // once its own quiet period finally runs out.
        for _ in 0..30 {
            debouncer.call();
            sleep(ms(3)).await;
        }
        sleep(ms(20)).await;

        let flushes = count.load(Ordering::SeqCst);
        assert_eq!(flushes, 2, "expected hard-deadline flush plus trailing flush");
    }

    #[tokio::test(start_paused = true)]
    async fn drop_aborts_without_a_final_flush() {
        let (debouncer, count) = counting_debouncer(5, 50);

        debouncer.call();
        drop(debouncer);
        sleep(ms(100)).await;

        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn a_new_burst_rearms_after_a_flush() {
        let (debouncer, count) = counting_debouncer(5, 50);

        debouncer.call();
        sleep(ms(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        debouncer.call();
        sleep(ms(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
