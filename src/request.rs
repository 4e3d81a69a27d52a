//! Incoming HTTP request type.

use std::borrow::Cow;
use std::collections::HashMap;
use std::net::SocketAddr;

use bytes::Bytes;
use http::{Extensions, HeaderMap, Method, Uri};

use crate::error::Error;
use crate::meta::{REMOTE_ADDR, RequestMeta, decode_header};

/// An incoming HTTP request.
///
/// Middleware attaches derived values to [`extensions`](Request::extensions);
/// the fingerprint middleware stores a [`Fingerprint`](crate::Fingerprint)
/// there.
pub struct Request {
    pub(crate) method: Method,
    pub(crate) uri: Uri,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Bytes,
    pub(crate) params: HashMap<String, String>,
    pub(crate) remote_addr: Option<SocketAddr>,
    pub(crate) extensions: Extensions,
}

impl Request {
    pub(crate) fn from_parts(
        parts: http::request::Parts,
        body: Bytes,
        remote_addr: Option<SocketAddr>,
    ) -> Self {
        Self {
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
            body,
            params: HashMap::new(),
            remote_addr,
            extensions: parts.extensions,
        }
    }

    /// Builds a request without a socket, for tests and embedding.
    pub fn builder() -> RequestBuilder {
        RequestBuilder { inner: http::Request::builder(), remote_addr: None, body: Bytes::new() }
    }

    pub fn method(&self) -> &Method { &self.method }
    pub fn uri(&self) -> &Uri { &self.uri }
    pub fn path(&self) -> &str { self.uri.path() }
    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Peer address of the connection, when the request came off a socket.
    pub fn remote_addr(&self) -> Option<SocketAddr> { self.remote_addr }

    pub fn extensions(&self) -> &Extensions { &self.extensions }
    pub fn extensions_mut(&mut self) -> &mut Extensions { &mut self.extensions }

    /// Case-insensitive header lookup. Bytes outside visible ASCII are
    /// decoded as ISO-8859-1, so a present header is never reported missing.
    pub fn header(&self, name: &str) -> Option<Cow<'_, str>> {
        self.headers.get(name).map(decode_header)
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/users/{id}`, `req.param("id")` on `/users/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

/// Headers, plus [`REMOTE_ADDR`] resolved to the peer IP without its port.
impl RequestMeta for Request {
    fn meta(&self, key: &str) -> Option<Cow<'_, str>> {
        if key == REMOTE_ADDR {
            return self.remote_addr.map(|addr| Cow::Owned(addr.ip().to_string()));
        }
        self.header(key)
    }
}

// ── RequestBuilder ────────────────────────────────────────────────────────────

/// Fluent builder for [`Request`]. Defaults to `GET /` with no peer address.
pub struct RequestBuilder {
    inner: http::request::Builder,
    remote_addr: Option<SocketAddr>,
    body: Bytes,
}

impl RequestBuilder {
    pub fn method(mut self, method: Method) -> Self {
        self.inner = self.inner.method(method);
        self
    }

    pub fn uri(mut self, uri: &str) -> Self {
        self.inner = self.inner.uri(uri);
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.inner = self.inner.header(name, value);
        self
    }

    pub fn remote_addr(mut self, addr: SocketAddr) -> Self {
        self.remote_addr = Some(addr);
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Fails if the URI or any header name/value was invalid.
    pub fn build(self) -> Result<Request, Error> {
        let (parts, ()) = self.inner.body(())?.into_parts();
        Ok(Request::from_parts(parts, self.body, self.remote_addr))
    }
}
