//! Request tracing middleware.

use std::time::Instant;

use tracing::{Instrument, info, info_span};

use crate::handler::BoxFuture;
use crate::middleware::{Middleware, Next};
use crate::request::Request;

/// Opens one span per request and logs the outcome when the response is
/// ready.
///
/// Register it first so its span covers every other middleware.
#[derive(Clone, Copy, Debug, Default)]
pub struct Trace;

impl Middleware for Trace {
    fn handle(&self, req: Request, next: Next) -> BoxFuture {
        let span = info_span!("request", method = %req.method(), path = req.path());
        let started = Instant::now();

        Box::pin(
            async move {
                let res = next.run(req).await;
                info!(
                    status = res.status_code().as_u16(),
                    latency_us = started.elapsed().as_micros() as u64,
                    "request completed"
                );
                res
            }
            .instrument(span),
        )
    }
}
