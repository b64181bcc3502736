use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};
use std::sync::{Arc, OnceLock};

use async_channel::{bounded, Receiver, Sender};
use futures_core::stream::Stream;

use crate::Cancel;

enum Never {}

/// `CancelSource` produces `CancelToken`s and cancels all of them when its
/// [`cancel`][CancelSource::cancel] operation is invoked.
///
/// Cancellation fires at most once: the first `cancel` call records the
/// [`Cancel`] reason and wakes every pending token, later calls change
/// nothing. Dropping the source without calling `cancel` does *not* cancel;
/// tokens from such a source simply never fire.
///
/// # Example:
///
/// ```ignore
/// let source = CancelSource::new();
/// let token = source.token();
/// schedule_some_work(token);
/// source.cancel(Some("no longer needed")); // Scheduled work observes the Cancel.
/// ```
#[derive(Debug)]
pub struct CancelSource {
    chan: Sender<Never>,
    token: CancelToken,
}

/// `CancelToken` is a future which resolves with the [`Cancel`] reason when
/// the associated [`CancelSource`] fires.
///
/// Awaiting a token (or a clone of it) is subscription; dropping the pending
/// future is unsubscription. A token polled after cancellation resolves
/// immediately, at that poll. A token whose source never fires stays pending
/// forever, source drop included.
#[derive(Debug, Clone)]
pub struct CancelToken {
    reason: Arc<OnceLock<Cancel>>,
    chan: Receiver<Never>,
}

impl Default for CancelSource {
    fn default() -> CancelSource {
        let (sender, receiver) = bounded::<Never>(1);

        CancelSource {
            chan: sender,
            token: CancelToken {
                reason: Arc::new(OnceLock::new()),
                chan: receiver,
            },
        }
    }
}

impl CancelSource {
    /// Creates a new `CancelSource`.
    pub fn new() -> CancelSource {
        CancelSource::default()
    }

    /// Produces a new `CancelToken`, associated with this source.
    ///
    /// Every token observes the same cancellation state.
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Cancels all tokens produced by this source.
    ///
    /// The first call records a [`Cancel`] carrying `message` and wakes every
    /// pending token exactly once. Subsequent calls are no-ops: the recorded
    /// reason is kept and tokens are not woken again. Both explicit caller
    /// cancellation and completion-driven cleanup may race to invoke this.
    pub fn cancel(&self, message: Option<&str>) {
        let cancel = Cancel::new(message.map(str::to_owned));
        if self.token.reason.set(cancel).is_ok() {
            tracing::debug!(reason = ?message, "cancellation requested");
            // Reason is published before the channel closes, so a woken
            // token always finds it.
            self.chan.close();
        }
    }
}

impl CancelToken {
    /// Returns `true` once the paired source has fired.
    pub fn is_cancelled(&self) -> bool {
        self.reason.get().is_some()
    }

    /// The recorded [`Cancel`], if cancellation has fired.
    pub fn reason(&self) -> Option<Cancel> {
        self.reason.get().cloned()
    }

    /// Synchronous short-circuit check.
    ///
    /// Returns `Err` with the recorded [`Cancel`] if cancellation has already
    /// fired, `Ok(())` otherwise. Call this before starting work that would
    /// be doomed from the outset.
    pub fn checked(&self) -> Result<(), Cancel> {
        match self.reason.get() {
            Some(reason) => Err(reason.clone()),
            None => Ok(()),
        }
    }
}

impl Future for CancelToken {
    type Output = Cancel;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if let Some(reason) = self.reason.get() {
            return Poll::Ready(reason.clone());
        }
        let chan = Pin::new(&mut self.chan);
        match Stream::poll_next(chan, cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Some(never)) => match never {},
            Poll::Ready(None) => match self.reason.get() {
                Some(reason) => Poll::Ready(reason.clone()),
                // Source dropped without firing: never resolves.
                None => Poll::Pending,
            },
        }
    }
}
