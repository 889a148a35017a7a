//! Transport seam between the loader and whatever performs the network I/O.
//!
//! # Design
//! `HttpClient` has a single operation. `get` starts the request when it is
//! called, not when the future is first polled, and hands back a `'static` future that resolves exactly once,
//! so the loader can move it onto the runtime without borrowing the client.
//! Test doubles record the URL synchronously and resolve the future later,
//! which keeps loader tests deterministic.
//!
//! `HttpResponse` is plain owned data, the same shape a host would build
//! after doing the I/O itself (see the `feed-ffi` crate).

use futures::future::BoxFuture;
use url::Url;

use crate::error::TransportError;

/// What a transport produces for one request.
pub type TransportResult = Result<HttpResponse, TransportError>;

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }
}

/// Capability to GET a URL.
///
/// Implementations start the request inside `get` and may deliver on any
/// thread. They must not retry and must report every failure as a
/// `TransportError`.
pub trait HttpClient: Send + Sync {
    fn get(&self, url: &Url) -> BoxFuture<'static, TransportResult>;
}
