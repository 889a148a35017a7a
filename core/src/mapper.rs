//! Response validation and JSON-to-domain mapping.
//!
//! # Design
//! The wire schema lives in private `Remote*` structs so the decode step can
//! lean on serde for shape checks: `Uuid` and `Url` both reject malformed
//! strings during deserialization, which makes validation all-or-nothing for
//! free. A single bad item fails the whole payload.
//!
//! Nothing here touches the network. `RemoteFeedLoader` calls
//! `map_outcome` after awaiting its transport; hosts that do their own I/O
//! call `map` directly.

use serde::Deserialize;
use tracing::debug;
use url::Url;
use uuid::Uuid;

use crate::error::LoaderError;
use crate::http::{HttpResponse, TransportResult};
use crate::types::{FeedItem, LoadFeedResult};

const OK_STATUS: u16 = 200;

#[derive(Deserialize)]
struct RemoteFeed {
    items: Vec<RemoteFeedItem>,
}

#[derive(Deserialize)]
struct RemoteFeedItem {
    id: Uuid,
    description: Option<String>,
    location: Option<String>,
    image: Url,
}

impl From<RemoteFeedItem> for FeedItem {
    fn from(item: RemoteFeedItem) -> Self {
        FeedItem {
            id: item.id,
            description: item.description,
            location: item.location,
            image_url: item.image,
        }
    }
}

/// Stateless translator from HTTP outcomes to `LoadFeedResult`.
pub struct FeedItemsMapper;

impl FeedItemsMapper {
    /// Validate the status and decode the `items` payload.
    pub fn map(response: &HttpResponse) -> LoadFeedResult {
        if response.status != OK_STATUS {
            debug!(status = response.status, "rejecting non-200 feed response");
            return Err(LoaderError::InvalidData);
        }
        let feed: RemoteFeed = serde_json::from_slice(&response.body).map_err(|e| {
            debug!(error = %e, "feed payload failed to decode");
            LoaderError::InvalidData
        })?;
        Ok(feed.items.into_iter().map(FeedItem::from).collect())
    }

    /// Map a transport outcome, collapsing any transport failure.
    pub fn map_outcome(outcome: TransportResult) -> LoadFeedResult {
        match outcome {
            Ok(response) => Self::map(&response),
            Err(e) => {
                debug!(error = %e, "feed transport failed");
                Err(LoaderError::Connectivity)
            }
        }
    }
}
