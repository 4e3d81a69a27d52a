//! Minimal browserprint example: every request is traced and fingerprinted.
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example basic
//!
//! Try:
//!   curl http://localhost:3000/whoami
//!   curl -H 'accept-language: fr' http://localhost:3000/whoami
//!   curl -A 'Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)' http://localhost:3000/whoami
//!   curl http://localhost:3000/healthz

use browserprint::middleware::{BrowserFingerprint, Trace};
use browserprint::{Fingerprint, Request, Response, Router, Server};
use http::Method;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let app = Router::new()
        .layer(Trace)
        .layer(BrowserFingerprint::new())
        .on(Method::GET, "/whoami", whoami)
        .on(Method::GET, "/healthz", healthz);

    Server::bind("0.0.0.0:3000")
        .serve(app)
        .await
        .expect("server error");
}

// GET /whoami → the fingerprint of the calling client as JSON
async fn whoami(req: Request) -> Response {
    let fp = Fingerprint::from_request(&req).map(Fingerprint::as_str).unwrap_or_default();
    Response::json(format!(r#"{{"{}":"{fp}"}}"#, Fingerprint::ATTRIBUTE))
}

async fn healthz(_req: Request) -> &'static str {
    "ok"
}
