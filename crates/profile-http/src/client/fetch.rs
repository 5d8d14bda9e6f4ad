//! Main profile REST client implementation.

use crate::client::config::ClientConfig;
use crate::client::native_network::NativeNetwork;
use crate::client::retry::{parse_retry_after, RetryConfig, RetryState};
use crate::client::session::Session;
use crate::client::utils;
use crate::error::{ApiError, Result};
use crate::traits::ProfileNetwork;
use crate::types::{ApiRequest, ApiResponse};
use std::sync::Arc;
use std::time::Duration;

/// The profile REST client.
///
/// Cheap to clone; clones share the connection pool, config and session.
#[derive(Clone)]
pub struct ProfileClient {
    network: Arc<dyn ProfileNetwork>,
    config: Arc<ClientConfig>,
    session: Arc<Session>,
}

impl ProfileClient {
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .http1_only()
            .connect_timeout(Duration::from_secs(
                config.connection_timeout_secs,
            ))
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(config.max_idle_per_host)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        Ok(Self::with_network(Arc::new(NativeNetwork::new(client)), config))
    }

    pub fn with_network(network: Arc<dyn ProfileNetwork>, config: ClientConfig) -> Self {
        ProfileClient {
            network,
            config: Arc::new(config),
            session: Arc::new(Session::anonymous()),
        }
    }

    /// Returns a client that authenticates as `session`.
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Arc::new(session);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Joins `path` onto the configured base URL.
    pub fn endpoint(&self, path: &str) -> Result<String> {
        let base = self.config.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        let joined = format!("{}/{}", base, path);
        url::Url::parse(&joined)?;
        Ok(joined)
    }

    pub async fn fetch(&self, url: &str, request: ApiRequest) -> Result<ApiResponse> {
        let request = self
            .session
            .apply(request)
            .with_header("x-request-id", utils::request_id());
        self.fetch_with_retries(url, request).await
    }

    fn retry_config_for(&self, request: &ApiRequest) -> RetryConfig {
        if !request.is_idempotent() {
            return RetryConfig::no_retry();
        }
        request.retry.clone().unwrap_or_else(|| {
            RetryConfig::default()
                .with_max_retries(self.config.max_retries)
                .with_base_delay(Duration::from_millis(self.config.retry_delay_ms))
        })
    }

    async fn fetch_with_retries(&self, url: &str, request: ApiRequest) -> Result<ApiResponse> {
        let mut retry_state = RetryState::new(self.retry_config_for(&request));

        loop {
            self.log_request(url, &request);

            let delay = match self.network.fetch(url, request.clone()).await {
                Ok(response) => {
                    self.log_response(url, &response);
                    let retry_after = response.header("retry-after").and_then(parse_retry_after);
                    match retry_state.after_status(response.status, retry_after) {
                        Some(delay) => {
                            tracing::warn!(
                                "[ProfileHTTP] {} {} returned {} (retry {}), waiting {:?}",
                                request.method,
                                url,
                                response.status,
                                retry_state.retries(),
                                delay
                            );
                            delay
                        }
                        None => return Ok(response),
                    }
                }
                Err(e) => match retry_state.after_error(&e) {
                    Some(delay) => {
                        tracing::warn!(
                            "[ProfileHTTP] {} {} failed (retry {}), waiting {:?}: {}",
                            request.method,
                            url,
                            retry_state.retries(),
                            delay,
                            e
                        );
                        delay
                    }
                    None => return Err(e),
                },
            };
            utils::sleep(delay).await;
        }
    }

    fn log_request(&self, url: &str, request: &ApiRequest) {
        if self.config.enable_logging {
            tracing::debug!(
                "[ProfileHTTP-Out] {} {} request-id={:?}",
                request.method,
                url,
                request.extra_headers.get("x-request-id")
            );
        }
    }

    fn log_response(&self, url: &str, response: &ApiResponse) {
        if self.config.enable_logging {
            tracing::debug!(
                "[ProfileHTTP-In] {} {} ({} bytes)",
                response.status,
                url,
                response.body.len()
            );
        }
    }
}
