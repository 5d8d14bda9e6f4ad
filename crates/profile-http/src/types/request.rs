//! Outgoing request parameters.

use crate::client::retry::RetryConfig;
use crate::error::Result;
use crate::types::{MultipartForm, RequestBody};
use serde::Serialize;
use std::collections::BTreeMap;

/// A single REST call, independent of the transport that sends it.
#[derive(Clone, Debug, Default)]
pub struct ApiRequest {
    pub method: String,
    pub body: RequestBody,
    pub query: Vec<(String, String)>,
    pub extra_headers: BTreeMap<String, String>,
    pub retry: Option<RetryConfig>,
}

impl ApiRequest {
    #[inline]
    pub fn new() -> Self {
        Self {
            method: "GET".to_string(),
            ..Default::default()
        }
    }

    pub fn get() -> Self {
        Self::new()
    }

    pub fn post() -> Self {
        Self::new().with_method("POST")
    }

    pub fn patch() -> Self {
        Self::new().with_method("PATCH")
    }

    pub fn delete() -> Self {
        Self::new().with_method("DELETE")
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    pub fn with_json<T: Serialize + ?Sized>(self, value: &T) -> Result<Self> {
        Ok(self.with_body(RequestBody::json(value)?))
    }

    pub fn with_multipart(self, form: MultipartForm) -> Self {
        self.with_body(RequestBody::Multipart(form))
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(key.into(), value.into());
        self
    }

    pub fn with_retry(mut self, config: RetryConfig) -> Self {
        self.retry = Some(config);
        self
    }

    /// Only reads are safe to repeat; mutations are sent once.
    #[inline]
    pub fn is_idempotent(&self) -> bool {
        matches!(self.method.to_uppercase().as_str(), "GET" | "HEAD")
    }
}
