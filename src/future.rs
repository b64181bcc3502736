//! Extension methods and types for the `Future` trait.

use core::future::Future;
use core::pin::Pin;

use pin_project_lite::pin_project;
use std::task::{Context, Poll};

use crate::{Cancel, CancelToken};

/// Extend the `Future` trait with the `until` method.
pub trait FutureExt: Future {
    /// Run a future until it resolves, or until the token fires.
    fn until(self, token: CancelToken) -> Cancellable<Self>
    where
        Self: Sized,
    {
        Cancellable {
            token,
            future: self,
        }
    }
}

impl<F: Future> FutureExt for F {}

pin_project! {
    /// Run a future until it resolves, or until the token fires.
    ///
    /// This future is returned by [`FutureExt::until`]. The token is polled
    /// first, so a cancellation that lands before the inner future's
    /// completion wins the race; once the inner future has resolved, the
    /// token half is dropped along with this combinator and a later fire is
    /// a no-op.
    #[must_use = "Futures do nothing unless polled or .awaited"]
    #[derive(Debug)]
    pub struct Cancellable<F> {
        #[pin]
        future: F,
        #[pin]
        token: CancelToken,
    }
}

impl<F> Future for Cancellable<F>
where
    F: Future,
{
    type Output = Result<F::Output, Cancel>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        if let Poll::Ready(cancel) = this.token.poll(cx) {
            return Poll::Ready(Err(cancel));
        }
        match this.future.poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(it) => Poll::Ready(Ok(it)),
        }
    }
}
