//! Cancellation — a one-shot signal a caller can fire from anywhere.
//!
//! [`cancel_pair`] returns a [`Canceller`] and a [`CancelToken`]. The token
//! is handed to prompts; firing the canceller (or dropping it) makes every
//! clone of the token report cancelled. The signal is a disconnected
//! channel, so a token can sit in a `crossbeam_channel::select!` next to
//! the line reader's result channel.

use std::sync::{Mutex, PoisonError};

use crossbeam_channel::{Receiver, Sender, TryRecvError, bounded};

/// The firing half. Cancels on [`cancel`](Self::cancel) or on drop.
#[derive(Debug)]
pub struct Canceller {
    tx: Mutex<Option<Sender<()>>>,
}

impl Canceller {
    /// Fire the signal. Idempotent.
    pub fn cancel(&self) {
        let tx = self.tx.lock().unwrap_or_else(PoisonError::into_inner).take();
        if tx.is_some() {
            tracing::debug!(target: "prompt.session", "cancel");
        }
    }
}

/// The observing half, passed to every prompt.
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: Receiver<()>,
}

impl CancelToken {
    /// A token that never fires.
    #[must_use]
    pub fn never() -> Self {
        Self {
            rx: crossbeam_channel::never(),
        }
    }

    /// Whether the signal has fired.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self.rx.try_recv(), Err(TryRecvError::Disconnected))
    }

    /// Channel that becomes ready (disconnected) once cancelled.
    pub(crate) const fn receiver(&self) -> &Receiver<()> {
        &self.rx
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::never()
    }
}

/// Create a connected canceller/token pair.
#[must_use]
pub fn cancel_pair() -> (Canceller, CancelToken) {
    let (tx, rx) = bounded(0);
    (
        Canceller {
            tx: Mutex::new(Some(tx)),
        },
        CancelToken { rx },
    )
}
