//! Middleware layer.
//!
//! Middleware intercepts a request on its way to the route handler and sees
//! the response on its way back. It is the right place for cross-cutting
//! concerns: tracing, fingerprinting, request-id injection.
//!
//! Each middleware receives the [`Request`] and a [`Next`] continuation.
//! Calling [`Next::run`] hands the request to the rest of the chain and
//! resolves to its [`Response`]:
//!
//! ```rust,no_run
//! use browserprint::middleware::Next;
//! use browserprint::{Request, Response};
//!
//! async fn stamp(req: Request, next: Next) -> Response {
//!     let mut res = next.run(req).await;
//!     res.headers_mut().insert("x-served-by", "browserprint".parse().unwrap());
//!     res
//! }
//! ```
//!
//! Built-in middleware:
//! - [`BrowserFingerprint`] attaches a [`Fingerprint`](crate::Fingerprint) to every request
//! - [`Trace`] opens a span per request and logs its status and latency

use std::future::Future;
use std::sync::Arc;

use crate::handler::{BoxFuture, BoxedHandler};
use crate::request::Request;
use crate::response::IntoResponse;

mod fingerprint;
mod trace;

pub use fingerprint::BrowserFingerprint;
pub use trace::Trace;

/// A unit of request processing that wraps the rest of the pipeline.
///
/// Any `async fn(Request, Next) -> impl IntoResponse` is a middleware.
pub trait Middleware: Send + Sync + 'static {
    fn handle(&self, req: Request, next: Next) -> BoxFuture;
}

pub(crate) type BoxedMiddleware = Arc<dyn Middleware>;

impl<F, Fut, R> Middleware for F
where
    F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn handle(&self, req: Request, next: Next) -> BoxFuture {
        let fut = self(req, next);
        Box::pin(async move { fut.await.into_response() })
    }
}

/// The remainder of the pipeline: the middleware still to run, then the
/// route endpoint.
pub struct Next {
    chain: Arc<Vec<BoxedMiddleware>>,
    index: usize,
    endpoint: BoxedHandler,
}

impl Next {
    pub(crate) fn new(chain: Arc<Vec<BoxedMiddleware>>, endpoint: BoxedHandler) -> Self {
        Self { chain, index: 0, endpoint }
    }

    /// Runs the rest of the pipeline on `req`.
    pub fn run(self, req: Request) -> BoxFuture {
        match self.chain.get(self.index).cloned() {
            Some(middleware) => {
                let next = Self { chain: self.chain, index: self.index + 1, endpoint: self.endpoint };
                middleware.handle(req, next)
            }
            None => self.endpoint.call(req),
        }
    }
}
