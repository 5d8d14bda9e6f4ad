//! Configuration for the profile REST client.

/// Configuration for the profile REST client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every resource path is joined onto.
    pub base_url: String,
    /// Maximum retries for idempotent requests. Zero disables retrying.
    pub max_retries: u32,
    /// Base retry delay in milliseconds.
    pub retry_delay_ms: u64,
    /// Connection timeout in seconds.
    pub connection_timeout_secs: u64,
    /// Request timeout in milliseconds.
    pub request_timeout_ms: u64,
    /// Log every request and response at debug level.
    pub enable_logging: bool,
    /// Maximum idle connections kept per host.
    pub max_idle_per_host: usize,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: "http://localhost:8080/api".to_string(),
            max_retries: 0,
            retry_delay_ms: 1000,
            connection_timeout_secs: 30,
            request_timeout_ms: 30000,
            enable_logging: false,
            max_idle_per_host: 16,
            user_agent: concat!("casting-profile/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}
