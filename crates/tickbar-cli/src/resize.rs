//! Terminal resize notifications.
//!
//! A background thread polls the terminal size and forwards changes as
//! [`BarEvent::Resize`] messages. The bar drains the channel between ticks,
//! so layout is only ever touched by the thread that owns the bar.

use std::io;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, RecvTimeoutError, Sender};
use tickbar_core::{BarEvent, CancellationToken};
use tracing::debug;

use crate::terminal::terminal_size;

/// Default interval between two size probes.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Handle to the polling thread. Dropping it stops the thread.
pub struct ResizeWatcher {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl ResizeWatcher {
    /// Watch the real terminal.
    pub fn spawn(
        tx: Sender<BarEvent>,
        interval: Duration,
        cancel: CancellationToken,
    ) -> io::Result<Self> {
        Self::spawn_with(terminal_size, tx, interval, cancel)
    }

    /// Watch sizes reported by `probe`.
    ///
    /// Only changes are sent; the size observed at spawn time is the
    /// baseline. The thread exits when stopped, when `cancel` fires, or when
    /// the receiving side hangs up.
    pub fn spawn_with<F>(
        mut probe: F,
        tx: Sender<BarEvent>,
        interval: Duration,
        cancel: CancellationToken,
    ) -> io::Result<Self>
    where
        F: FnMut() -> Option<(u16, u16)> + Send + 'static,
    {
        let (stop_tx, stop_rx) = bounded::<()>(0);
        let handle = thread::Builder::new()
            .name("tickbar-resize".to_string())
            .spawn(move || {
                let mut last = probe();
                loop {
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {}
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                    if cancel.is_cancelled() {
                        break;
                    }
                    let Some(size) = probe() else { continue };
                    if last == Some(size) {
                        continue;
                    }
                    last = Some(size);
                    let (width, height) = size;
                    debug!(width, height, "terminal resized");
                    if tx.send(BarEvent::Resize { width, height }).is_err() {
                        break;
                    }
                }
            })?;

        Ok(Self {
            stop: Some(stop_tx),
            handle: Some(handle),
        })
    }

    /// Stop polling and wait for the thread to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for ResizeWatcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crossbeam_channel::unbounded;

    const FAST: Duration = Duration::from_millis(1);

    #[test]
    fn forwards_size_changes_only() {
        let sizes = [(80, 24), (80, 24), (120, 40), (120, 40), (100, 30)];
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let probe = move || {
            let i = counter.fetch_add(1, Ordering::SeqCst);
            Some(sizes[i.min(sizes.len() - 1)])
        };

        let (tx, rx) = unbounded();
        let watcher = ResizeWatcher::spawn_with(probe, tx, FAST, CancellationToken::new()).unwrap();

        let first = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        let second = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        watcher.stop();

        assert_eq!(
            first,
            BarEvent::Resize {
                width: 120,
                height: 40
            }
        );
        assert_eq!(
            second,
            BarEvent::Resize {
                width: 100,
                height: 30
            }
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn failed_probe_sends_nothing() {
        let (tx, rx) = unbounded();
        let watcher =
            ResizeWatcher::spawn_with(|| None, tx, FAST, CancellationToken::new()).unwrap();
        thread::sleep(Duration::from_millis(20));
        watcher.stop();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn cancellation_stops_thread() {
        let cancel = CancellationToken::new();
        let (tx, rx) = unbounded();
        let mut width = 10u16;
        let watcher = ResizeWatcher::spawn_with(
            move || {
                width = width.wrapping_add(1);
                Some((width, 10))
            },
            tx,
            FAST,
            cancel.clone(),
        )
        .unwrap();
        cancel.cancel();
        drop(watcher);
        // The sender is dropped with the thread.
        while rx.recv_timeout(Duration::from_secs(5)).is_ok() {}
        assert!(matches!(
            rx.recv_timeout(Duration::from_millis(10)),
            Err(RecvTimeoutError::Disconnected)
        ));
    }

    #[test]
    fn receiver_hangup_ends_thread() {
        let (tx, rx) = unbounded();
        drop(rx);
        let mut width = 10u16;
        let watcher = ResizeWatcher::spawn_with(
            move || {
                width = width.wrapping_add(1);
                Some((width, 10))
            },
            tx,
            FAST,
            CancellationToken::new(),
        )
        .unwrap();
        watcher.stop();
    }
}
