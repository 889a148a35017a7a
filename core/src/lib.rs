//! Remote feed loading core.
//!
//! # Overview
//! Fetches a feed endpoint through an injected `HttpClient`, validates the
//! response, and delivers a `LoadFeedResult` (a list of `FeedItem`s or one of
//! two `LoaderError` kinds) to a one-shot completion.
//!
//! # Design
//! - `HttpClient` is the only I/O seam. `UreqHttpClient` is the bundled
//!   implementation; tests substitute spies.
//! - `FeedItemsMapper` is pure: status check plus JSON decode. Hosts that do
//!   their own I/O (see `feed-ffi`) call it directly.
//! - `RemoteFeedLoader` issues one request per `load`, maps the outcome, and
//!   drops the result if its owner released it first.
//! - Transport error detail stops at the loader boundary. Callers only see
//!   `Connectivity` or `InvalidData`.

pub mod config;
pub mod error;
pub mod http;
pub mod loader;
pub mod mapper;
pub mod types;
pub mod ureq_client;

pub use config::HttpClientConfig;
pub use error::{LoaderError, TransportError};
pub use http::{HttpClient, HttpResponse, TransportResult};
pub use loader::{FeedLoader, LoadCompletion, RemoteFeedLoader};
pub use mapper::FeedItemsMapper;
pub use types::{FeedItem, LoadFeedResult};
pub use ureq_client::UreqHttpClient;
