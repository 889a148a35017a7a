//! `HttpClient` backed by a blocking `ureq` agent.
//!
//! # Design
//! ureq is synchronous, so each `get` runs on Tokio's blocking pool. The
//! blocking task is spawned inside `get` itself, so the request is in flight
//! before the returned future is first polled. Without a current runtime
//! there is nowhere to run it and the future resolves to a `TransportError`.
//! The agent is configured to hand back every status as data: deciding what
//! a 404 or a 500 means is the loader's job, not the transport's. Anything that prevents
//! a response from arriving becomes a `TransportError`.

use futures::future::{self, BoxFuture, FutureExt};
use tokio::runtime::Handle;
use tracing::{debug, warn};
use url::Url;

use crate::config::HttpClientConfig;
use crate::error::TransportError;
use crate::http::{HttpClient, HttpResponse, TransportResult};

#[derive(Clone)]
pub struct UreqHttpClient {
    agent: ureq::Agent,
    user_agent: String,
}

impl UreqHttpClient {
    pub fn new(config: &HttpClientConfig) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(config.timeout())
            .build()
            .new_agent();
        Self {
            agent,
            user_agent: config.user_agent.clone(),
        }
    }
}

impl Default for UreqHttpClient {
    fn default() -> Self {
        Self::new(&HttpClientConfig::default())
    }
}

impl HttpClient for UreqHttpClient {
    fn get(&self, url: &Url) -> BoxFuture<'static, TransportResult> {
        let Ok(runtime) = Handle::try_current() else {
            warn!(%url, "no Tokio runtime to run the request on");
            return future::ready(Err(TransportError::new("no Tokio runtime to run the request")))
                .boxed();
        };

        let agent = self.agent.clone();
        let user_agent = self.user_agent.clone();
        let url = url.to_string();
        let task = runtime.spawn_blocking(move || execute(&agent, &url, &user_agent));

        async move { task.await.unwrap_or_else(|e| Err(TransportError::new(e))) }.boxed()
    }
}

fn execute(agent: &ureq::Agent, url: &str, user_agent: &str) -> TransportResult {
    debug!(url, "HTTP GET");
    let mut response = agent
        .get(url)
        .header("user-agent", user_agent)
        .call()
        .map_err(TransportError::new)?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();
    let body = response
        .body_mut()
        .read_to_vec()
        .map_err(TransportError::new)?;

    debug!(url, status, bytes = body.len(), "HTTP response");
    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}
