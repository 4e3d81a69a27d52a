//! # browserprint
//!
//! Per-request browser fingerprinting for a minimal hyper-based HTTP
//! framework.
//!
//! Every request that passes through [`BrowserFingerprint`] gets a
//! [`Fingerprint`]: the SHA-256 of its client address, raw user agent,
//! parsed browser/OS/device fields and `Accept-Language` header, rendered as
//! 64 lowercase hex characters. Handlers read it back with
//! [`Fingerprint::from_request`]. Nothing is stored or compared; what you do
//! with the value is up to you.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use browserprint::middleware::{BrowserFingerprint, Trace};
//! use browserprint::{Fingerprint, Request, Response, Router, Server};
//! use http::Method;
//!
//! #[tokio::main]
//! async fn main() {
//!     let app = Router::new()
//!         .layer(Trace)
//!         .layer(BrowserFingerprint::new())
//!         .on(Method::GET, "/whoami", whoami);
//!
//!     Server::bind("0.0.0.0:3000").serve(app).await.unwrap();
//! }
//!
//! async fn whoami(req: Request) -> Response {
//!     let fp = Fingerprint::from_request(&req).map(ToString::to_string);
//!     Response::text(fp.unwrap_or_default())
//! }
//! ```
//!
//! ## Bring your own user-agent parser
//!
//! The default parser is [`Woothee`](agent::Woothee). Anything implementing
//! [`UserAgentParser`], including a plain closure, can replace it:
//!
//! ```rust
//! use browserprint::middleware::BrowserFingerprint;
//! use browserprint::UserAgent;
//!
//! let fingerprinting = BrowserFingerprint::with_parser(|_ua: &str| UserAgent::default());
//! ```

mod error;
mod fingerprint;
mod handler;
mod meta;
mod request;
mod response;
mod router;
mod server;

pub mod agent;
pub mod middleware;

pub use agent::{UserAgent, UserAgentParser};
pub use error::Error;
pub use fingerprint::{FINGERPRINT_LEN, FieldSet, Fingerprint};
pub use handler::{BoxFuture, Handler};
pub use meta::{REMOTE_ADDR, RequestMeta};
pub use middleware::BrowserFingerprint;
pub use request::{Request, RequestBuilder};
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
