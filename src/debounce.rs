//! Trailing-edge debouncer.
//!
//! Owns at most one pending timer. Every [`Debouncer::schedule`] cancels the
//! pending timer and starts a new one; when a timer survives the whole window
//! its value is sent down the output channel. Delivery goes through a channel
//! rather than running work inside the timer task so that cancelling a timer
//! can never interrupt work that already started.

use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

pub struct Debouncer<T> {
    window: Duration,
    out: UnboundedSender<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(window: Duration, out: UnboundedSender<T>) -> Self {
        Self {
            window,
            out,
            pending: None,
        }
    }

    /// Restart the window with `value` as the one to deliver.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, value: T) {
        self.cancel();
        let window = self.window;
        let out = self.out.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            // Receiver gone means the consumer shut down; nothing to do.
            let _ = out.send(value);
        }));
    }

    /// Drop the pending value, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

// No Drop impl: a timer still pending when its owner goes away keeps running
// and delivers. Callers that want teardown to discard it call `cancel`.
