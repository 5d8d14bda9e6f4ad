//! Authenticated session carried by a `ProfileClient`.

use crate::types::ApiRequest;
use std::fmt;

/// Who the client acts as. Injected into the client instead of living in
/// process-wide storage.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            token: (!token.trim().is_empty()).then_some(token),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[inline]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn authorization(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    /// Adds the `Authorization` header unless the request already has one.
    pub fn apply(&self, request: ApiRequest) -> ApiRequest {
        let has_auth = request
            .extra_headers
            .keys()
            .any(|k| k.eq_ignore_ascii_case("authorization"));
        match self.authorization() {
            Some(value) if !has_auth => request.with_header("Authorization", value),
            _ => request,
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
