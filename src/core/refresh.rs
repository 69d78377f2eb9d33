//! Background refresh scheduling for faro.
//!
//! A timer thread that never touches shared state: on each interval it posts
//! a tick into a single-slot channel, and the UI loop drains that channel on
//! its own turn and runs an ordinary `refresh()` there. The tick channel is
//! bounded(1), so ticks that arrive while one is still pending coalesce
//! instead of queueing.
//!
//! Shutdown is cooperative: [RefreshScheduler::shutdown] signals the thread
//! and joins it, so a tick already in flight finishes before shared state is
//! torn down.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, bounded};

/// Handle to the refresh timer thread.
pub struct RefreshScheduler {
    tick_rx: Receiver<()>,
    stop_tx: Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl RefreshScheduler {
    /// Starts the timer thread with the given interval.
    pub fn spawn(interval: Duration) -> Self {
        let (tick_tx, tick_rx) = bounded::<()>(1);
        let (stop_tx, stop_rx) = bounded::<()>(1);

        let handle = thread::spawn(move || {
            loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        // A full slot means the UI has not drained the last
                        // tick yet; skipping is the coalescing behavior.
                        let _ = tick_tx.try_send(());
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        });

        Self {
            tick_rx,
            stop_tx,
            handle: Some(handle),
        }
    }

    /// True when a tick is pending. Draining consumes it.
    pub fn take_tick(&self) -> bool {
        self.tick_rx.try_recv().is_ok()
    }

    /// Stops the timer and waits for the thread to exit.
    pub fn shutdown(&mut self) {
        let _ = self.stop_tx.try_send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}
