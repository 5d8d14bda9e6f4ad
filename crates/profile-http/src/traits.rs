use crate::error::Result;
use crate::types::{ApiRequest, ApiResponse};
use async_trait::async_trait;

/// Abstraction for network operations.
///
/// `NativeNetwork` is the reqwest-backed implementation; tests may plug in
/// their own.
#[async_trait]
pub trait ProfileNetwork: Send + Sync + 'static {
    async fn fetch(&self, url: &str, req: ApiRequest) -> Result<ApiResponse>;
}
