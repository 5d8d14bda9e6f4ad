//! Profile REST client implementation.

mod config;
mod fetch;
pub mod native_network;
pub mod retry;
mod session;
pub mod utils;

pub use config::ClientConfig;
pub use fetch::ProfileClient;
pub use native_network::NativeNetwork;
pub use retry::{parse_retry_after, RetryConfig, RetryState};
pub use session::Session;
