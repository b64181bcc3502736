//! Wiring a [`CancelToken`] into the lifecycle of a network request.
//!
//! A request moves through three stages: not started, dispatched, settled.
//! [`send`] covers all of them with one rule per stage: an already-cancelled
//! token short-circuits the call before the transport is touched; a token
//! firing in flight aborts the transport and settles the call with the
//! [`Cancel`]; a token firing after settlement finds nothing left to reject.
//!
//! The transport itself is a capability supplied by the caller via the
//! [`Transport`] trait. Building the request (headers, serialization, URL
//! handling) is the transport's concern, not this module's.

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::future::FutureExt as _;
use crate::{Cancel, CancelToken};

/// Bare-bones request description handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    url: String,
}

impl Request {
    /// Creates a request for `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// The request target.
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Response delivered by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failure raised by the transport before a response was produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transport failure: {message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    /// Creates a transport error with a description of the failure.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// How a request can fail, as seen by the caller.
///
/// Callers branch on the variant, never on message text.
#[derive(Debug, Error)]
pub enum Error {
    /// The caller abandoned the request through its [`CancelToken`].
    #[error(transparent)]
    Cancelled(#[from] Cancel),
    /// The transport failed before a response was produced.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The server answered with a non-success status.
    #[error("request failed with status {0}")]
    Status(u16),
}

impl Error {
    /// Whether this failure is a cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled(_))
    }
}

/// The capability that performs a request.
///
/// `abort` must be idempotent and safe to invoke after the request has
/// settled; [`send`] calls it at most once per in-flight cancellation and
/// never otherwise.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs `request`, resolving when the response arrives.
    async fn dispatch(&self, request: Request) -> Result<Response, TransportError>;

    /// Tears down the in-flight request, if any.
    fn abort(&self);
}

/// Per-call configuration accepted by [`send`].
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Token observed for the lifetime of the call. `None` makes the call
    /// non-cancellable.
    pub cancel_token: Option<CancelToken>,
}

/// Performs `request` over `transport`, honoring `config.cancel_token`.
///
/// Cancellation before dispatch means the transport is never invoked, abort
/// included. Cancellation in flight aborts the transport once and settles
/// the call with [`Error::Cancelled`]. Cancellation after settlement has no
/// observable effect: the token subscription is dropped the moment the
/// transport resolves, so repeated calls against one source leave nothing
/// behind.
pub async fn send<T>(
    transport: &T,
    request: Request,
    config: RequestConfig,
) -> Result<Response, Error>
where
    T: Transport + ?Sized,
{
    if let Some(token) = &config.cancel_token {
        token.checked()?;
    }

    let response = match config.cancel_token {
        None => transport.dispatch(request).await?,
        Some(token) => {
            debug!(url = %request.url, "dispatching cancellable request");
            match transport.dispatch(request).until(token).await {
                Ok(settled) => settled?,
                Err(cancel) => {
                    debug!(%cancel, "cancelled in flight, aborting transport");
                    transport.abort();
                    return Err(Error::Cancelled(cancel));
                }
            }
        }
    };

    if !response.is_success() {
        return Err(Error::Status(response.status));
    }
    Ok(response)
}
