//! Unified error type.

/// The error type returned by browserprint's fallible operations.
///
/// Fingerprinting itself never fails. Application-level errors (404, 422,
/// etc.) are expressed as [`Response`](crate::Response) values. This type
/// surfaces infrastructure failures: binding a port, accepting a connection,
/// building a request by hand, or reading back a stored fingerprint.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid bind address `{addr}`: {source}")]
    Addr {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("http: {0}")]
    Http(#[from] http::Error),

    #[error("invalid fingerprint: expected 64 lowercase hex characters, got {0:?}")]
    Fingerprint(String),
}
