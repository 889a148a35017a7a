//! Error types for the feed loader and its transport.
//!
//! # Design
//! Callers of `RemoteFeedLoader` only ever see `LoaderError`, a closed set of
//! two kinds. Everything a transport can report (DNS failure, refused
//! connection, timeout, truncated body) is carried by `TransportError` up to
//! the loader and collapsed there into `LoaderError::Connectivity`. Status and
//! payload problems become `LoaderError::InvalidData`.

use std::error::Error as StdError;

use thiserror::Error;

/// Errors delivered to a `load` completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LoaderError {
    /// No usable HTTP response was obtained.
    #[error("could not reach the feed endpoint")]
    Connectivity,

    /// A response arrived but its status or payload was not a valid feed.
    #[error("feed response was not a valid payload")]
    InvalidData,
}

/// Opaque failure reported by an `HttpClient` implementation.
#[derive(Debug, Error)]
#[error("transport failure: {source}")]
pub struct TransportError {
    source: Box<dyn StdError + Send + Sync>,
}

impl TransportError {
    pub fn new(source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self {
            source: source.into(),
        }
    }
}
