//! Cooperative cancellation for async network requests.
//!
//! # Motivation
//!
//! Rust futures come with a built-in cancellation mechanism: dropping a
//! future prevents any further progress. For a network request that is not
//! enough on its own. Abandoning an in-flight call correctly means
//! coordinating three independently-timed events — the caller's cancel, the
//! request dispatch, and the response arrival — into a single consistent
//! outcome: the call must settle exactly once, the transport's native handle
//! (socket, timer) must be torn down, and a cancel that arrives before
//! dispatch or after settlement must be harmless.
//!
//! This crate provides that protocol. A [`CancelSource`] hands out
//! [`CancelToken`]s; the token rides along with a request as configuration,
//! and the first of {cancel, response} to arrive wins. Cancelling before
//! dispatch short-circuits the call without touching the transport;
//! cancelling in flight aborts the transport and surfaces a [`Cancel`];
//! cancelling after settlement does nothing at all.
//!
//! # Usage
//!
//! You can race any future against a token with the `until` combinator:
//!
//! ```
//! use async_std::task;
//! use std::time::Duration;
//!
//! use cancel_token::prelude::*;
//! use cancel_token::CancelSource;
//!
//! #[async_std::main]
//! async fn main() {
//!     // Create a source and hand its token to some work.
//!     let source = CancelSource::new();
//!     let token = source.token();
//!
//!     // Cancel from elsewhere, 100 millis in.
//!     task::spawn(async move {
//!         task::sleep(Duration::from_millis(100)).await;
//!         source.cancel(Some("no longer needed"));
//!     });
//!
//!     // The work observes the cancellation instead of running to the end.
//!     let outcome = task::sleep(Duration::from_secs(60)).until(token).await;
//!     assert!(outcome.is_err());
//! }
//! ```
//!
//! Or wire a token into a request through the [`request`] module:
//!
//! ```ignore
//! let source = CancelSource::new();
//! let config = RequestConfig { cancel_token: Some(source.token()) };
//! let pending = send(&transport, Request::new("/status"), config);
//! // source.cancel(None) at any point settles `pending` with a Cancel.
//! ```
//!
//! # Lineage
//!
//! The cancellation model is a subset of `C#` [`CancellationToken /
//! CancellationTokenSource`](https://docs.microsoft.com/en-us/dotnet/standard/threading/cancellation-in-managed-threads),
//! with the explicit single-fire `cancel(reason)` shape popularized by
//! HTTP clients in dynamic languages.

#![forbid(unsafe_code)]
#![deny(missing_debug_implementations, nonstandard_style, rust_2018_idioms)]
#![warn(missing_docs, future_incompatible, unreachable_pub)]

pub mod future;
pub mod request;
pub mod stream;

mod cancel;
mod cancel_source;

pub use cancel::Cancel;
pub use cancel_source::{CancelSource, CancelToken};

/// A prelude for `cancel-token`.
pub mod prelude {
    pub use crate::future::FutureExt as _;
    pub use crate::stream::StreamExt as _;
}
