//! Request bodies: JSON documents and multipart forms.

use crate::error::Result;
use bytes::Bytes;
use serde::Serialize;

/// Body attached to an outgoing request.
#[derive(Clone, Debug, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    /// Serialized JSON document.
    Json(Bytes),
    /// `multipart/form-data` with text fields and file parts.
    Multipart(MultipartForm),
}

impl RequestBody {
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(RequestBody::Json(Bytes::from(serde_json::to_vec(value)?)))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, RequestBody::Empty)
    }

    pub fn as_json(&self) -> Option<&[u8]> {
        match self {
            RequestBody::Json(bytes) => Some(bytes),
            _ => None,
        }
    }
}

/// A file carried inside a multipart form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilePart {
    /// Form field name.
    pub name: String,
    pub file_name: String,
    /// MIME type; reqwest falls back to `application/octet-stream`.
    pub mime: Option<String>,
    pub bytes: Bytes,
}

/// Multipart form kept in a cloneable shape so retries can rebuild it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MultipartForm {
    pub fields: Vec<(String, String)>,
    pub files: Vec<FilePart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn file(mut self, part: FilePart) -> Self {
        self.files.push(part);
        self
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}
