//! Extension methods and types for the `Stream` trait.

use core::future::Future;
use core::pin::Pin;

use futures_core::Stream;
use pin_project_lite::pin_project;
use std::task::{Context, Poll};

use crate::{Cancel, CancelToken};

/// Extend the `Stream` trait with the `until` method.
pub trait StreamExt: Stream {
    /// Applies the token to the `stream`, such that the resulting stream
    /// produces the [`Cancel`] once and then no more items when the token
    /// fires.
    fn until(self, token: CancelToken) -> CancellableStream<Self>
    where
        Self: Sized,
    {
        CancellableStream {
            stream: self,
            token,
            fired: false,
        }
    }
}

impl<S: Stream> StreamExt for S {}

pin_project! {
    #[derive(Debug)]
    pub struct CancellableStream<S> {
        #[pin]
        stream: S,
        #[pin]
        token: CancelToken,
        fired: bool,
    }
}

impl<S> Stream for CancellableStream<S>
where
    S: Stream,
{
    type Item = Result<S::Item, Cancel>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        if *this.fired {
            return Poll::Ready(None);
        }
        if let Poll::Ready(cancel) = this.token.poll(cx) {
            *this.fired = true;
            return Poll::Ready(Some(Err(cancel)));
        }
        this.stream.poll_next(cx).map(|el| el.map(Ok))
    }
}
