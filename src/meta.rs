//! Key-based access to request metadata.
//!
//! Fingerprinting only ever asks a request one question: "what is the value
//! for this key, if any?". [`RequestMeta`] captures exactly that, so the
//! fingerprint code works on anything that can answer it: the framework's
//! own [`Request`](crate::Request), a bare [`http::HeaderMap`] or a plain
//! environment dictionary.
//!
//! Keys are HTTP header names, plus the [`REMOTE_ADDR`] pseudo-key for the
//! peer address.

use std::borrow::Cow;
use std::collections::HashMap;

use http::{HeaderMap, HeaderValue};

/// Pseudo-key for the client address of the connection (IP only, no port).
pub const REMOTE_ADDR: &str = "REMOTE_ADDR";

/// Read-only lookup of header-like request metadata.
pub trait RequestMeta {
    /// Returns the value stored under `key`, or `None` when absent.
    fn meta(&self, key: &str) -> Option<Cow<'_, str>>;

    /// Returns the value stored under `key`, or an empty string when absent.
    fn meta_or_default(&self, key: &str) -> String {
        self.meta(key).map(Cow::into_owned).unwrap_or_default()
    }
}

/// Decodes a header value as ISO-8859-1, one `char` per byte.
///
/// Lossless for every byte sequence, so distinct values stay distinct.
/// Visible-ASCII values are borrowed as is.
pub(crate) fn decode_header(value: &HeaderValue) -> Cow<'_, str> {
    match value.to_str() {
        Ok(ascii) => Cow::Borrowed(ascii),
        Err(_) => Cow::Owned(value.as_bytes().iter().map(|&b| char::from(b)).collect()),
    }
}

/// Header lookup only. Case-insensitive; [`REMOTE_ADDR`] is never present.
impl RequestMeta for HeaderMap {
    fn meta(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get(key).map(decode_header)
    }
}

/// Exact-key lookup, for callers that already hold a flat environment map.
impl RequestMeta for HashMap<String, String> {
    fn meta(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get(key).map(|v| Cow::Borrowed(v.as_str()))
    }
}
