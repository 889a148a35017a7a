//! Domain types handed to feed consumers.
//!
//! # Design
//! `FeedItem` is the validated form of one wire object. It is defined
//! independently of the JSON shape (see `mapper`) so the wire field names
//! (`image`) never leak into the domain (`image_url`). The mock-server crate
//! keeps its own copy of the wire schema; integration tests catch drift.

use url::Url;
use uuid::Uuid;

use crate::error::LoaderError;

/// A single entry of a loaded feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub id: Uuid,
    pub description: Option<String>,
    pub location: Option<String>,
    pub image_url: Url,
}

/// Outcome of one `load` call.
pub type LoadFeedResult = Result<Vec<FeedItem>, LoaderError>;
