//! Error types for the API client.

use reqwest::StatusCode;

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A required rate-limit header was absent or empty.
    #[error("Rate limit header not found: {header}")]
    HeaderMissing { header: &'static str },
    /// A rate-limit header was not a non-negative integer, or overflowed.
    #[error("Rate limit header {header} with value {value:?} is not a valid integer")]
    HeaderMalformed { header: &'static str, value: String },
    /// The client configuration is unusable (empty credentials, bad base URL).
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
    /// The outgoing request could not be built (bad method or URL).
    #[error("Failed to build request: {0}")]
    RequestBuildFailed(String),
    /// A request body could not be serialized to JSON.
    #[error("Failed to encode request body")]
    Encode(#[source] serde_json::Error),
    /// The request never got a response (connection refused, DNS, timeout).
    #[error("Request failed")]
    Transport(#[source] reqwest::Error),
    /// The request was cancelled through its cancellation token.
    #[error("Request cancelled")]
    Cancelled,
    /// HTTP 401: bad API key or secret.
    #[error("Request failed with status 401: bad API key")]
    Unauthorized,
    /// HTTP 403: the API key is missing the scope for this endpoint.
    #[error("Request failed with status 403: scope missing for API key")]
    Forbidden,
    /// HTTP 408, still failing after the retry ceiling.
    #[error("Request failed with status 408: timed out")]
    Timeout,
    /// HTTP 429, still failing after the retry ceiling.
    #[error("Request failed with status 429: rate limited")]
    RateLimited,
    /// Any other non-success status.
    #[error("Request failed with status {status}")]
    UnexpectedStatus { status: u16 },
    /// The response body could not be read.
    #[error("Failed to read response body")]
    BodyReadFailed(#[source] reqwest::Error),
    /// The payload matched none of the object, array or paginated shapes.
    #[error("Failed to decode response")]
    Decode(#[source] serde_json::Error),
    /// The response held no element where one was required.
    #[error("Response contained no results")]
    EmptyResult,
}

impl Error {
    /// Classifies a non-success HTTP status.
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => Error::Unauthorized,
            StatusCode::FORBIDDEN => Error::Forbidden,
            StatusCode::REQUEST_TIMEOUT => Error::Timeout,
            StatusCode::TOO_MANY_REQUESTS => Error::RateLimited,
            other => Error::UnexpectedStatus {
                status: other.as_u16(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_known_statuses() {
        assert!(matches!(
            Error::from_status(StatusCode::UNAUTHORIZED),
            Error::Unauthorized
        ));
        assert!(matches!(
            Error::from_status(StatusCode::FORBIDDEN),
            Error::Forbidden
        ));
        assert!(matches!(
            Error::from_status(StatusCode::REQUEST_TIMEOUT),
            Error::Timeout
        ));
        assert!(matches!(
            Error::from_status(StatusCode::TOO_MANY_REQUESTS),
            Error::RateLimited
        ));
    }

    #[test]
    fn classifies_other_statuses_as_unexpected() {
        assert!(matches!(
            Error::from_status(StatusCode::NOT_FOUND),
            Error::UnexpectedStatus { status: 404 }
        ));
        assert!(matches!(
            Error::from_status(StatusCode::HTTP_VERSION_NOT_SUPPORTED),
            Error::UnexpectedStatus { status: 505 }
        ));
    }

    #[test]
    fn display_mentions_status() {
        let err = Error::UnexpectedStatus { status: 500 };
        assert!(err.to_string().contains("500"));

        let err = Error::HeaderMissing {
            header: "x-ratelimit-used",
        };
        assert!(err.to_string().contains("x-ratelimit-used"));
    }
}
