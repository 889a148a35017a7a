//! Settings for the bundled `ureq` transport.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Transport configuration. The loader itself has no knobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpClientConfig {
    /// Upper bound in whole seconds on a request, connect through body read.
    /// `None` waits indefinitely.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: Option<u64>,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl HttpClientConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn default_timeout_secs() -> Option<u64> {
    Some(30)
}

fn default_user_agent() -> String {
    format!("feed-core/{}", env!("CARGO_PKG_VERSION"))
}
