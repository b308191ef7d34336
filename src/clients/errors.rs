//! Error types for Table API requests.
//!
//! - [`AuthError`]: The instance rejected the credentials (HTTP 401)
//! - [`UnexpectedApiResponse`]: A status the operation does not accept
//! - [`ServiceNowError`]: Network failures and malformed response bodies
//! - [`ClientError`]: Unified error type encompassing all of the above
//!
//! None of these are retried by the client.
//!
//! # Example
//!
//! ```rust,ignore
//! use servicenow_client::ClientError;
//!
//! match client.get("table/incident/123").await {
//!     Ok(response) if response.status == 404 => println!("No such incident"),
//!     Ok(response) => println!("Incident: {}", response.json()?),
//!     Err(ClientError::Auth(e)) => println!("Check credentials: {e}"),
//!     Err(ClientError::UnexpectedResponse(e)) => {
//!         println!("API error {}: {}", e.status, e.body_text());
//!     }
//!     Err(e) => println!("Request failed: {e}"),
//! }
//! ```

use std::fmt;

use thiserror::Error;

use crate::clients::Response;
use crate::error::ConfigError;

/// Error returned when the instance answers with HTTP 401.
///
/// Either the user credentials are wrong or the cached access token is no
/// longer valid. The client does not log in again on its own.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Failed to authenticate with the instance: {code} {reason}")]
pub struct AuthError {
    /// The HTTP status code (always 401).
    pub code: u16,
    /// The HTTP reason phrase.
    pub reason: String,
}

/// Error returned when a response status is not valid for the operation.
///
/// # Example
///
/// ```rust
/// use servicenow_client::UnexpectedApiResponse;
///
/// let error = UnexpectedApiResponse {
///     status: 403,
///     body: b"forbidden".to_vec(),
/// };
///
/// assert_eq!(error.to_string(), "Unexpected response - 403 forbidden");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub struct UnexpectedApiResponse {
    /// The HTTP status code of the response.
    pub status: u16,
    /// The raw response body.
    pub body: Vec<u8>,
}

impl UnexpectedApiResponse {
    /// Captures the status and body of a response.
    #[must_use]
    pub fn from_response(response: &Response) -> Self {
        Self {
            status: response.status,
            body: response.data.clone(),
        }
    }

    /// Returns the body as text, replacing invalid UTF-8 sequences.
    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

impl fmt::Display for UnexpectedApiResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unexpected response - {} {}", self.status, self.body_text())
    }
}

/// Catch-all error for network failures and malformed responses.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ServiceNowError {
    /// Human readable description of the failure.
    pub message: String,
    /// The underlying error, when one caused the failure.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ServiceNowError {
    /// Creates a new error with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new error wrapping the error that caused it.
    #[must_use]
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Unified error type for all client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The instance rejected the credentials.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The response status is not valid for the operation.
    #[error(transparent)]
    UnexpectedResponse(#[from] UnexpectedApiResponse),

    /// Network failure or malformed response body.
    #[error(transparent)]
    ServiceNow(#[from] ServiceNowError),

    /// The client configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_message_includes_code_and_reason() {
        let error = AuthError {
            code: 401,
            reason: "Unauthorized".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to authenticate with the instance: 401 Unauthorized"
        );
    }

    #[test]
    fn test_unexpected_response_includes_status_and_body() {
        let error = UnexpectedApiResponse {
            status: 500,
            body: br#"{"error":{"message":"boom"}}"#.to_vec(),
        };
        let message = error.to_string();
        assert!(message.contains("500"));
        assert!(message.contains("boom"));
    }

    #[test]
    fn test_unexpected_response_tolerates_binary_body() {
        let error = UnexpectedApiResponse {
            status: 502,
            body: vec![0xff, b'o', b'k'],
        };
        assert_eq!(error.body_text(), "\u{fffd}ok");
    }

    #[test]
    fn test_from_response_copies_status_and_body() {
        let response = Response::new(403, b"forbidden".to_vec());
        let error = UnexpectedApiResponse::from_response(&response);
        assert_eq!(error.status, 403);
        assert_eq!(error.body, b"forbidden");
    }

    #[test]
    fn test_client_error_is_transparent() {
        let error: ClientError = ServiceNowError::new("connection refused").into();
        assert_eq!(error.to_string(), "connection refused");

        let error: ClientError = ConfigError::EmptyPassword.into();
        assert!(matches!(error, ClientError::Config(_)));
    }

    #[test]
    fn test_servicenow_error_exposes_its_cause() {
        use std::error::Error as _;

        let cause = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = ServiceNowError::with_source("bad body", cause);

        assert_eq!(error.to_string(), "bad body");
        assert!(error.source().is_some());
        assert!(ServiceNowError::new("bad body").source().is_none());
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let _: &dyn std::error::Error = &AuthError {
            code: 401,
            reason: String::new(),
        };
        let _: &dyn std::error::Error = &ServiceNowError::new("x");
        let _: &dyn std::error::Error = &ClientError::from(ServiceNowError::new("x"));
    }
}
