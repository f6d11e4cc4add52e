//! Error types for the API client.

use thiserror::Error;

/// Failure of a call to the account API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("no token available")]
    MissingToken,

    #[error("HTTP error, status: {0}")]
    Status(u16),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid response structure: {0}")]
    MalformedProfile(String),

    #[error("request body cannot be cloned for a retry")]
    UnclonableRequest,
}

/// Coarse classification of an [`ApiError`], used by the route guard to say
/// why a session could not be established.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// No credential, or the server rejected it.
    Unauthenticated,
    /// Network trouble, rate limiting or a server-side fault. Retrying later may succeed.
    Transient,
    /// The server answered, but not in a shape this client understands.
    Malformed,
}

impl ApiError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ApiError::MissingToken => FailureKind::Unauthenticated,
            ApiError::Status(429) => FailureKind::Transient,
            ApiError::Status(status) if *status >= 500 => FailureKind::Transient,
            ApiError::Status(_) => FailureKind::Unauthenticated,
            ApiError::Request(_) => FailureKind::Transient,
            ApiError::MalformedProfile(_) | ApiError::UnclonableRequest => FailureKind::Malformed,
        }
    }

    /// HTTP status code, when the failure was a non-2xx response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status(status) => Some(*status),
            ApiError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Missing or invalid client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(ApiError::MissingToken.kind(), FailureKind::Unauthenticated);
        assert_eq!(ApiError::Status(401).kind(), FailureKind::Unauthenticated);
        assert_eq!(ApiError::Status(403).kind(), FailureKind::Unauthenticated);
        assert_eq!(ApiError::Status(429).kind(), FailureKind::Transient);
        assert_eq!(ApiError::Status(503).kind(), FailureKind::Transient);
        assert_eq!(
            ApiError::MalformedProfile("user level not found".into()).kind(),
            FailureKind::Malformed
        );
    }

    #[test]
    fn test_status_message_carries_code() {
        let error = ApiError::Status(429);
        assert_eq!(error.status(), Some(429));
        assert!(error.to_string().contains("429"));
    }
}
