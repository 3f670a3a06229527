//! # Backend Error Type
//!
//! Failures crossing the HTTP boundary, split along the taxonomy the UI
//! cares about:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       ApiError Taxonomy                                 │
//! │                                                                         │
//! │  Network          transport failure - the request never completed.     │
//! │                   Generic notification, user retries manually.         │
//! │                                                                         │
//! │  Server           request completed, backend said success:false.       │
//! │                   The server's message is surfaced VERBATIM.           │
//! │                                                                         │
//! │  InvalidResponse  request completed but the body didn't match the      │
//! │                   contract (decode failure, missing fields).           │
//! │                                                                         │
//! │  In every case the caller's local state stays untouched - no retry,    │
//! │  no backoff, no escalation.                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Errors from the pricing backend boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure - the request never completed.
    #[error("Could not reach the pricing backend: {0}")]
    Network(#[source] reqwest::Error),

    /// The backend reported `success: false`; `message` is its error string.
    #[error("{message}")]
    Server { message: String },

    /// The response body didn't match the wire contract.
    #[error("Unexpected response from the pricing backend: {reason}")]
    InvalidResponse { reason: String },
}

impl ApiError {
    /// Creates a server-reported error.
    pub fn server(message: impl Into<String>) -> Self {
        ApiError::Server {
            message: message.into(),
        }
    }

    /// Creates an invalid-response error.
    pub fn invalid_response(reason: impl Into<String>) -> Self {
        ApiError::InvalidResponse {
            reason: reason.into(),
        }
    }
}

/// Body decode failures are contract violations, not connectivity problems.
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::InvalidResponse {
                reason: err.to_string(),
            }
        } else {
            ApiError::Network(err)
        }
    }
}

/// Convenience type alias for Results with ApiError.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_surfaced_verbatim() {
        let err = ApiError::server("No inventory found for Acrylic 3mm Clear");
        assert_eq!(err.to_string(), "No inventory found for Acrylic 3mm Clear");
    }

    #[test]
    fn test_invalid_response_message() {
        let err = ApiError::invalid_response("missing field `price`");
        assert!(err.to_string().contains("missing field `price`"));
    }
}
