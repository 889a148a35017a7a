//! Remote feed loader: one transport request per `load`, one typed result.
//!
//! # Design
//! `RemoteFeedLoader` holds only the endpoint URL, a shared transport, and a
//! release flag. `load` calls `HttpClient::get` before returning, so the
//! request is registered synchronously, then moves the transport future onto
//! the current Tokio runtime. Once the transport resolves, the outcome goes
//! through `FeedItemsMapper` and the completion runs, unless the loader was
//! released in the meantime, in which case the result is dropped.
//!
//! The release flag is flipped by `Drop` and by `release`, so a consumer that
//! tears down its loader never hears back from loads it started. Nothing is
//! cancelled: the transport request still runs to completion.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::{debug, warn};
use url::Url;

use crate::error::LoaderError;
use crate::http::HttpClient;
use crate::mapper::FeedItemsMapper;
use crate::types::LoadFeedResult;

/// One-shot callback receiving the outcome of a load.
pub type LoadCompletion = Box<dyn FnOnce(LoadFeedResult) + Send + 'static>;

/// Anything that can produce a feed asynchronously.
pub trait FeedLoader {
    /// Start a load. `completion` runs at most once, on a runtime worker.
    fn load(&self, completion: LoadCompletion);
}

/// Loads a feed from a fixed URL through an injected `HttpClient`.
pub struct RemoteFeedLoader {
    url: Url,
    client: Arc<dyn HttpClient>,
    released: Arc<AtomicBool>,
}

impl RemoteFeedLoader {
    pub fn new(url: Url, client: Arc<dyn HttpClient>) -> Self {
        Self {
            url,
            client,
            released: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Stop delivering results for loads that are still in flight.
    pub fn release(&self) {
        self.released.store(true, Ordering::Release);
    }
}

impl Drop for RemoteFeedLoader {
    fn drop(&mut self) {
        self.release();
    }
}

impl FeedLoader for RemoteFeedLoader {
    /// Outside a Tokio runtime nothing can drive the transport, so no request
    /// is issued and `completion` receives `Connectivity` immediately.
    fn load(&self, completion: LoadCompletion) {
        let Ok(runtime) = Handle::try_current() else {
            warn!(url = %self.url, "feed load started outside a Tokio runtime");
            completion(Err(LoaderError::Connectivity));
            return;
        };

        debug!(url = %self.url, "loading feed");
        let response = self.client.get(&self.url);
        let released = Arc::clone(&self.released);
        let url = self.url.clone();

        runtime.spawn(async move {
            let result = FeedItemsMapper::map_outcome(response.await);
            if released.load(Ordering::Acquire) {
                debug!(%url, "loader released before completion, dropping result");
                return;
            }
            completion(result);
        });
    }
}
