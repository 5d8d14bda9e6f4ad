//! REST transport for casting-profile sections.
//!
//! `ProfileClient` sends `ApiRequest`s through a `ProfileNetwork` and hands
//! back raw `ApiResponse`s. Status interpretation is left to the caller.

pub mod client;
pub mod error;
pub mod traits;
pub mod types;

pub use client::{ClientConfig, ProfileClient, RetryConfig, Session};
pub use error::{ApiError, Result};
pub use types::{ApiRequest, ApiResponse, FilePart, MultipartForm, RequestBody};
