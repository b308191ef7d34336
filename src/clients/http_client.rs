//! Transport layer for instance communication.
//!
//! This module provides the [`HttpClient`] type, which sends fully resolved
//! requests with `reqwest` and classifies what came back:
//!
//! - **Completed** (2xx status): wrapped into a [`Response`]
//! - **Non-2xx status, 401**: [`AuthError`]
//! - **Non-2xx status, other**: a [`Response`] with the reason phrase as
//!   body, so callers decide whether the status is acceptable
//! - **Network failure**: [`ServiceNowError`]

use std::error::Error as _;

use crate::clients::errors::{AuthError, ClientError, ServiceNowError};
use crate::clients::http_request::RawRequest;
use crate::clients::Response;
use crate::config::InstanceConfig;

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// What the transport produced for a single request.
#[derive(Debug)]
pub(crate) enum TransportOutcome {
    /// The server answered with a 2xx status.
    Completed(Response),
    /// The server answered with any other status.
    HttpStatus { status: u16, reason: String },
    /// No HTTP answer was obtained.
    Network(String),
}

impl TransportOutcome {
    /// Converts the outcome into what callers of the dispatch layer see.
    pub fn into_result(self) -> Result<Response, ClientError> {
        match self {
            Self::Completed(response) => Ok(response),
            Self::HttpStatus { status: 401, reason } => {
                tracing::warn!("Instance rejected the credentials: 401 {reason}");
                Err(AuthError { code: 401, reason }.into())
            }
            Self::HttpStatus { status, reason } => Ok(Response::new(status, reason.into_bytes())),
            Self::Network(reason) => Err(ServiceNowError::new(reason).into()),
        }
    }
}

/// HTTP client owning the connection pool used for every request.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    user_agent: String,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates the transport for an instance.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::ServiceNow`] if the underlying reqwest client
    /// cannot be created (e.g., TLS initialization failure).
    pub fn new(config: &InstanceConfig) -> Result<Self, ClientError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let user_agent = format!("{user_agent_prefix}ServiceNow Table API Client v{SDK_VERSION}");

        let mut builder = reqwest::Client::builder()
            .use_rustls_tls()
            .user_agent(user_agent.clone());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| {
            ServiceNowError::with_source(format!("Failed to create HTTP client: {e}"), e)
        })?;

        Ok(Self { client, user_agent })
    }

    /// Returns the `User-Agent` header sent with every request.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Sends a request and classifies the result.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Auth`] if the instance answers with 401
    /// - [`ClientError::ServiceNow`] if no HTTP answer was obtained
    pub(crate) async fn dispatch(&self, request: RawRequest) -> Result<Response, ClientError> {
        tracing::debug!("Sending {} request to {}", request.method, request.url);

        self.send(request).await.into_result()
    }

    async fn send(&self, request: RawRequest) -> TransportOutcome {
        let mut builder = self
            .client
            .request(request.method.as_reqwest(), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let res = match builder.send().await {
            Ok(res) => res,
            Err(e) => return TransportOutcome::Network(error_chain(&e)),
        };

        let status = res.status();
        tracing::debug!("Received {} from {}", status.as_u16(), request.url);

        if !status.is_success() {
            return TransportOutcome::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            };
        }

        let headers: Vec<(String, String)> = res
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();

        match res.bytes().await {
            Ok(body) => TransportOutcome::Completed(Response::with_headers(
                status.as_u16(),
                body.to_vec(),
                headers,
            )),
            Err(e) => TransportOutcome::Network(error_chain(&e)),
        }
    }
}

/// Joins an error and its sources, e.g. `error sending request: connection refused`.
fn error_chain(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HostUrl, Password, Username};
    use std::time::Duration;

    fn create_test_config(prefix: Option<&str>) -> InstanceConfig {
        let builder = InstanceConfig::builder()
            .host(HostUrl::new("https://instance.service-now.com").unwrap())
            .username(Username::new("user").unwrap())
            .password(Password::new("pass").unwrap())
            .timeout(Duration::from_secs(5));
        match prefix {
            Some(prefix) => builder.user_agent_prefix(prefix).build().unwrap(),
            None => builder.build().unwrap(),
        }
    }

    #[test]
    fn test_user_agent_without_prefix() {
        let client = HttpClient::new(&create_test_config(None)).unwrap();
        assert_eq!(
            client.user_agent(),
            format!("ServiceNow Table API Client v{SDK_VERSION}")
        );
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let client = HttpClient::new(&create_test_config(Some("ops-sync/2.1"))).unwrap();
        assert!(client.user_agent().starts_with("ops-sync/2.1 | ServiceNow"));
    }

    #[test]
    fn test_completed_outcome_is_returned_as_is() {
        let response = Response::new(200, b"{}".to_vec());
        let result = TransportOutcome::Completed(response).into_result().unwrap();
        assert_eq!(result.status, 200);
        assert_eq!(result.data, b"{}");
    }

    #[test]
    fn test_unauthorized_becomes_auth_error() {
        let result = TransportOutcome::HttpStatus {
            status: 401,
            reason: "Unauthorized".to_string(),
        }
        .into_result();

        match result {
            Err(ClientError::Auth(e)) => {
                assert_eq!(e.code, 401);
                assert_eq!(e.reason, "Unauthorized");
            }
            other => panic!("expected auth error, got {other:?}"),
        }
    }

    #[test]
    fn test_other_error_status_becomes_response() {
        let response = TransportOutcome::HttpStatus {
            status: 404,
            reason: "Not Found".to_string(),
        }
        .into_result()
        .unwrap();

        assert_eq!(response.status, 404);
        assert_eq!(response.data, b"Not Found");
        assert!(response.headers.is_empty());
    }

    #[test]
    fn test_network_failure_becomes_servicenow_error() {
        let result = TransportOutcome::Network("connection refused".to_string()).into_result();

        match result {
            Err(ClientError::ServiceNow(e)) => assert_eq!(e.message, "connection refused"),
            other => panic!("expected network error, got {other:?}"),
        }
    }
}
