//! Client configuration.

use serde::{Deserialize, Serialize};

/// Base URL of the public railway service.
pub const DEFAULT_BASE_URL: &str = "http://api.railwayapi.com/";

/// How parameters are laid out as URL path segments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathLayout {
    /// `op/value1/value2/.../apikey/key`
    #[default]
    Positional,
    /// `op/name1/value1/name2/value2/.../apikey/key`
    Labelled,
}

/// Configuration for `RailwayClient` and the ureq transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Credential appended to every request path.
    pub api_key: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub layout: PathLayout,

    /// Request timeout in seconds, applied by `UreqTransport`.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            layout: PathLayout::default(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_layout(mut self, layout: PathLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}
