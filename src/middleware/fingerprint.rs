//! Browser fingerprinting middleware.

use tracing::debug;

use crate::agent::{UserAgentParser, Woothee};
use crate::fingerprint::{FieldSet, Fingerprint};
use crate::handler::BoxFuture;
use crate::meta::RequestMeta;
use crate::middleware::{Middleware, Next};
use crate::request::Request;

/// Computes a [`Fingerprint`] for every request and attaches it to the
/// request extensions before the rest of the pipeline runs.
///
/// The response from downstream is returned untouched.
///
/// ```rust,no_run
/// use browserprint::middleware::BrowserFingerprint;
/// use browserprint::{Fingerprint, Request, Response, Router};
/// use http::Method;
///
/// async fn whoami(req: Request) -> Response {
///     match Fingerprint::from_request(&req) {
///         Some(fp) => Response::text(fp.to_string()),
///         None => Response::text("unknown"),
///     }
/// }
///
/// let app = Router::new()
///     .layer(BrowserFingerprint::new())
///     .on(Method::GET, "/whoami", whoami);
/// ```
pub struct BrowserFingerprint<P = Woothee> {
    parser: P,
}

impl BrowserFingerprint {
    /// Fingerprinting with the default woothee user-agent parser.
    pub fn new() -> Self {
        Self { parser: Woothee::new() }
    }
}

impl Default for BrowserFingerprint {
    fn default() -> Self { Self::new() }
}

impl<P: UserAgentParser> BrowserFingerprint<P> {
    /// Fingerprinting with a custom user-agent parser.
    pub fn with_parser(parser: P) -> Self {
        Self { parser }
    }

    /// Computes the fingerprint for `req` without touching it.
    pub fn fingerprint<R: RequestMeta + ?Sized>(&self, req: &R) -> Fingerprint {
        Fingerprint::from_fields(&FieldSet::collect(req, &self.parser))
    }
}

impl<P: UserAgentParser> Middleware for BrowserFingerprint<P> {
    fn handle(&self, mut req: Request, next: Next) -> BoxFuture {
        let fingerprint = self.fingerprint(&req);
        debug!(
            method = %req.method(),
            path = req.path(),
            browser_fingerprint = %fingerprint,
            "request fingerprinted"
        );
        req.extensions_mut().insert(fingerprint);
        next.run(req)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use http::{HeaderMap, HeaderValue};

    use super::*;
    use crate::agent::UserAgent;
    use crate::meta::REMOTE_ADDR;

    #[test]
    fn same_inputs_same_fingerprint() {
        let mw = BrowserFingerprint::new();
        let a = Request::builder().header("user-agent", "TestAgent/1.0").build().unwrap();
        let b = Request::builder().header("user-agent", "TestAgent/1.0").build().unwrap();

        assert_eq!(mw.fingerprint(&a), mw.fingerprint(&b));
    }

    #[test]
    fn different_agents_differ() {
        let mw = BrowserFingerprint::new();
        let a = Request::builder().header("user-agent", "AgentA/1.0").build().unwrap();
        let b = Request::builder().header("user-agent", "AgentB/1.0").build().unwrap();

        assert_ne!(mw.fingerprint(&a), mw.fingerprint(&b));
    }

    #[test]
    fn bare_request_is_well_formed() {
        let mw = BrowserFingerprint::new();
        let req = Request::builder().build().unwrap();

        let fp = mw.fingerprint(&req);
        assert_eq!(fp.as_str().len(), 64);
        assert!(fp.as_str().parse::<Fingerprint>().is_ok());
    }

    #[test]
    fn request_and_environment_agree() {
        let mw = BrowserFingerprint::with_parser(|_: &str| UserAgent::default());
        let req = Request::builder()
            .header("User-Agent", "TestAgent/1.0")
            .header("Accept-Language", "de-CH")
            .remote_addr("127.0.0.1:9000".parse().unwrap())
            .build()
            .unwrap();

        let env: HashMap<String, String> = [
            (REMOTE_ADDR, "127.0.0.1"),
            ("user-agent", "TestAgent/1.0"),
            ("accept-language", "de-CH"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .collect();

        assert_eq!(mw.fingerprint(&req), mw.fingerprint(&env));
    }

    #[test]
    fn non_ascii_agents_stay_distinct() {
        let mw = BrowserFingerprint::new();
        let headers = |ua: &str| {
            let mut headers = HeaderMap::new();
            headers.insert("user-agent", HeaderValue::from_str(ua).unwrap());
            headers
        };

        let a = mw.fingerprint(&headers("MyApp/1.0 (Ünïcode)"));
        let b = mw.fingerprint(&headers("OtherApp/9 (日本)"));
        let empty = mw.fingerprint(&HeaderMap::new());

        assert_ne!(a, b);
        assert_ne!(a, empty);
        assert_ne!(b, empty);
    }

    #[test]
    fn port_does_not_matter() {
        let mw = BrowserFingerprint::new();
        let a = Request::builder().remote_addr("10.0.0.1:1111".parse().unwrap()).build().unwrap();
        let b = Request::builder().remote_addr("10.0.0.1:2222".parse().unwrap()).build().unwrap();
        let c = Request::builder().remote_addr("10.0.0.2:1111".parse().unwrap()).build().unwrap();

        assert_eq!(mw.fingerprint(&a), mw.fingerprint(&b));
        assert_ne!(mw.fingerprint(&a), mw.fingerprint(&c));
    }
}
