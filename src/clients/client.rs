//! Table API client.
//!
//! This module provides the [`Client`] type, which authenticates against a
//! ServiceNow instance and exposes the Table API verbs with their accepted
//! status codes.

use tokio::sync::OnceCell;

use crate::auth::oauth::{self, PasswordGrantRequest};
use crate::auth::{AuthHeader, AuthStrategy};
use crate::clients::errors::{ClientError, ServiceNowError, UnexpectedApiResponse};
use crate::clients::http_client::HttpClient;
use crate::clients::http_request::{DataType, HttpMethod, RawRequest};
use crate::clients::Response;
use crate::config::{ClientId, ClientSecret, HostUrl, InstanceConfig, Password, Username};

/// Path prefix of the Table API, relative to the instance URL.
pub const TABLE_API_PREFIX: &str = "/api/now/";

/// Client for the ServiceNow Table API.
///
/// Authentication happens lazily: the first request resolves the
/// `Authorization` header and every later request reuses it. Cached tokens
/// are never refreshed; once the instance stops accepting one, requests fail
/// with [`ClientError::Auth`].
///
/// # Thread Safety
///
/// `Client` is `Send + Sync`. Concurrent first requests share a single
/// login.
///
/// # Example
///
/// ```rust,ignore
/// use servicenow_client::Client;
/// use serde_json::json;
///
/// let client = Client::with_credentials(
///     "https://dev12345.service-now.com",
///     "admin",
///     "secret",
///     None,
///     None,
/// )?;
///
/// let created = client
///     .post("table/incident", &json!({"short_description": "Printer on fire"}))
///     .await?;
/// let sys_id = created.json()?["result"]["sys_id"].as_str().unwrap_or_default();
///
/// let found = client.get(&format!("table/incident/{sys_id}")).await?;
/// if found.status == 404 {
///     println!("Incident vanished");
/// }
///
/// client.delete(&format!("table/incident/{sys_id}")).await?;
/// ```
#[derive(Debug)]
pub struct Client {
    config: InstanceConfig,
    strategy: AuthStrategy,
    auth_header: OnceCell<AuthHeader>,
    http_client: HttpClient,
}

// Verify Client is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Client>();
};

impl Client {
    /// Creates a client for the configured instance.
    ///
    /// No request is sent until the first API call.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::ServiceNow`] if the HTTP transport cannot be
    /// created.
    pub fn new(config: InstanceConfig) -> Result<Self, ClientError> {
        let strategy = AuthStrategy::from_config(&config);
        let http_client = HttpClient::new(&config)?;

        tracing::debug!(
            "Created client for {} using {} authentication",
            config.host(),
            strategy.kind()
        );

        Ok(Self {
            config,
            strategy,
            auth_header: OnceCell::new(),
            http_client,
        })
    }

    /// Creates a client from plain credential strings.
    ///
    /// Empty `client_id` or `client_secret` values count as absent, so a
    /// client with only one of them falls back to basic auth.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the host is malformed or the user
    /// name or password is empty.
    pub fn with_credentials(
        host: &str,
        username: &str,
        password: &str,
        client_id: Option<&str>,
        client_secret: Option<&str>,
    ) -> Result<Self, ClientError> {
        let mut builder = InstanceConfig::builder()
            .host(HostUrl::new(host)?)
            .username(Username::new(username)?)
            .password(Password::new(password)?);

        if let Some(client_id) = client_id.filter(|id| !id.is_empty()) {
            builder = builder.client_id(ClientId::new(client_id)?);
        }
        if let Some(client_secret) = client_secret.filter(|secret| !secret.is_empty()) {
            builder = builder.client_secret(ClientSecret::new(client_secret)?);
        }

        Self::new(builder.build()?)
    }

    /// Returns the instance configuration.
    #[must_use]
    pub const fn config(&self) -> &InstanceConfig {
        &self.config
    }

    /// Returns the authentication strategy selected for this client.
    #[must_use]
    pub const fn strategy(&self) -> &AuthStrategy {
        &self.strategy
    }

    /// Returns the `Authorization` header, logging in on first use.
    ///
    /// The header is computed at most once. A failed login leaves nothing
    /// cached, so the next call tries again.
    ///
    /// # Errors
    ///
    /// - [`ClientError::UnexpectedResponse`] if the token endpoint answers
    ///   with a status other than 200
    /// - [`ClientError::Auth`] if the token endpoint answers with 401
    /// - [`ClientError::ServiceNow`] on network failure or a token response
    ///   without `access_token`
    pub async fn auth_header(&self) -> Result<&AuthHeader, ClientError> {
        self.auth_header.get_or_try_init(|| self.login()).await
    }

    async fn login(&self) -> Result<AuthHeader, ClientError> {
        match &self.strategy {
            AuthStrategy::Basic { username, password } => Ok(AuthHeader::basic(username, password)),
            AuthStrategy::OAuth {
                username,
                password,
                client_id,
                client_secret,
            } => {
                let grant = PasswordGrantRequest {
                    username,
                    password,
                    client_id,
                    client_secret,
                };
                self.login_oauth(&grant).await
            }
        }
    }

    async fn login_oauth(&self, grant: &PasswordGrantRequest<'_>) -> Result<AuthHeader, ClientError> {
        tracing::debug!("Requesting OAuth access token from {}", self.config.host());

        let request = RawRequest::new(HttpMethod::Post, oauth::token_url(self.config.host()))
            .headers([("Accept", "application/json")])
            .body(grant.to_form(), DataType::Form);
        let response = self.http_client.dispatch(request).await?;

        if response.status != 200 {
            tracing::warn!(
                "Token endpoint answered with unexpected status {}",
                response.status
            );
        }

        oauth::bearer_from_response(&response)
    }

    /// Returns the full Table API URL for a relative path.
    ///
    /// Trailing slashes are removed and each path segment is percent-encoded.
    /// A leading slash is kept, so `/table/x` yields `/api/now//table/x`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use servicenow_client::Client;
    ///
    /// let client = Client::with_credentials("https://instance.service-now.com", "user", "pass", None, None).unwrap();
    /// assert_eq!(
    ///     client.table_url("table/incident name/"),
    ///     "https://instance.service-now.com/api/now/table/incident%20name"
    /// );
    /// ```
    #[must_use]
    pub fn table_url(&self, path: &str) -> String {
        let escaped_path = path
            .trim_end_matches('/')
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");

        format!("{}{TABLE_API_PREFIX}{escaped_path}", self.config.host())
    }

    /// Sends a Table API request without checking the response status.
    ///
    /// With `data`, the payload is sent as compact JSON.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Auth`] if the instance rejects the credentials
    /// - [`ClientError::ServiceNow`] on network failure
    /// - Any error from [`auth_header`](Self::auth_header)
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        data: Option<&serde_json::Value>,
    ) -> Result<Response, ClientError> {
        let url = self.table_url(path);
        let auth_header = self.auth_header().await?;

        let mut request = RawRequest::new(method, url).headers([
            ("Accept", "application/json"),
            (auth_header.name(), auth_header.value()),
        ]);

        if let Some(data) = data {
            let body = serde_json::to_string(data)
                .map_err(|e| {
                ServiceNowError::with_source(format!("Failed to encode request body: {e}"), e)
            })?;
            request = request.body(body, DataType::Json);
        }

        self.http_client.dispatch(request).await
    }

    /// Fetches a record or collection.
    ///
    /// A 404 is returned as a normal response so callers can tell a missing
    /// record apart from a failure.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::UnexpectedResponse`] for any status other
    /// than 200 or 404, plus any error from [`request`](Self::request).
    pub async fn get(&self, path: &str) -> Result<Response, ClientError> {
        let response = self.request(HttpMethod::Get, path, None).await?;
        expect_status(response, &[200, 404])
    }

    /// Creates a record.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::UnexpectedResponse`] for any status other
    /// than 201, plus any error from [`request`](Self::request).
    pub async fn post(&self, path: &str, data: &serde_json::Value) -> Result<Response, ClientError> {
        let response = self.request(HttpMethod::Post, path, Some(data)).await?;
        expect_status(response, &[201])
    }

    /// Replaces a record.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::UnexpectedResponse`] for any status other
    /// than 200, plus any error from [`request`](Self::request).
    pub async fn put(&self, path: &str, data: &serde_json::Value) -> Result<Response, ClientError> {
        let response = self.request(HttpMethod::Put, path, Some(data)).await?;
        expect_status(response, &[200])
    }

    /// Deletes a record.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::UnexpectedResponse`] for any status other
    /// than 204, plus any error from [`request`](Self::request).
    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let response = self.request(HttpMethod::Delete, path, None).await?;
        expect_status(response, &[204]).map(|_| ())
    }
}

fn expect_status(response: Response, accepted: &[u16]) -> Result<Response, ClientError> {
    if accepted.contains(&response.status) {
        Ok(response)
    } else {
        Err(UnexpectedApiResponse::from_response(&response).into())
    }
}
