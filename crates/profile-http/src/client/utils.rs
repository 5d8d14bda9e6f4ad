//! Utility functions for the profile REST client.

use std::time::Duration;

pub fn is_retryable_status(status: u16) -> bool {
    matches!(status, 408 | 425 | 429 | 502 | 503 | 504)
}

pub fn is_access_denied_status(status: u16) -> bool {
    matches!(status, 401 | 403)
}

/// Correlation id sent as `x-request-id`.
pub fn request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classes() {
        assert!(is_retryable_status(503));
        assert!(!is_retryable_status(500));
        assert!(is_access_denied_status(403));
        assert!(!is_access_denied_status(404));
    }

    #[test]
    fn test_request_ids_are_unique() {
        assert_ne!(request_id(), request_id());
    }
}
