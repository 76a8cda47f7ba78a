// src/config.rs
// =============================================================================
// Client-wide settings: where the gist API lives and how the default HTTP
// client is built.
//
// There are no config files or environment variables; callers build a
// ClientConfig in code and hand it to GistClient.
// =============================================================================

use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

/// Root of the public gist API.
pub const DEFAULT_API_ROOT: &str = "https://api.github.com/gists";

/// Per-request timeout used by the default requester.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings shared by every operation of a [`GistClient`](crate::GistClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    api_root: String,
    timeout: Duration,
    user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_root: DEFAULT_API_ROOT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("gistkit/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Points the client at another gist API root, e.g. a GitHub Enterprise
    /// host (`https://ghe.example.com/api/v3/gists`) or a local test server.
    pub fn with_api_root(mut self, root: &str) -> Result<Self> {
        let url = Url::parse(root).map_err(|e| Error::InvalidConfig {
            message: format!("invalid API root '{}': {}", root, e),
        })?;

        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(Error::InvalidConfig {
                message: format!("API root must be an http(s) URL: {}", root),
            });
        }

        self.api_root = url.as_str().trim_end_matches('/').to_string();
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    // `{root}` for create, without a trailing slash
    pub(crate) fn collection_url(&self) -> String {
        self.api_root.clone()
    }

    // `{root}/{id}` for read and update
    pub(crate) fn gist_url(&self, id: &str) -> String {
        format!("{}/{}", self.collection_url(), id)
    }
}
