//! Configuration types for connecting to a ServiceNow instance.
//!
//! The main types in this module are:
//!
//! - [`InstanceConfig`]: Instance URL, credentials and transport settings
//! - [`InstanceConfigBuilder`]: A builder for constructing [`InstanceConfig`] instances
//! - [`HostUrl`]: A validated instance URL
//! - [`Username`], [`Password`]: Validated user credentials
//! - [`ClientId`], [`ClientSecret`]: Validated OAuth application credentials
//!
//! # Example
//!
//! ```rust
//! use servicenow_client::{HostUrl, InstanceConfig, Password, Username};
//!
//! let config = InstanceConfig::builder()
//!     .host(HostUrl::new("https://dev12345.service-now.com").unwrap())
//!     .username(Username::new("admin").unwrap())
//!     .password(Password::new("secret").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert!(!config.uses_oauth());
//! ```

mod newtypes;

pub use newtypes::{ClientId, ClientSecret, HostUrl, Password, Username};

use std::time::Duration;

use crate::error::ConfigError;

/// Connection settings for a single ServiceNow instance.
///
/// OAuth is used when both [`client_id`](Self::client_id) and
/// [`client_secret`](Self::client_secret) are set. Otherwise requests
/// authenticate with HTTP basic auth.
#[derive(Clone, Debug)]
pub struct InstanceConfig {
    host: HostUrl,
    username: Username,
    password: Password,
    client_id: Option<ClientId>,
    client_secret: Option<ClientSecret>,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl InstanceConfig {
    /// Creates a new builder for constructing an `InstanceConfig`.
    #[must_use]
    pub fn builder() -> InstanceConfigBuilder {
        InstanceConfigBuilder::new()
    }

    /// Returns the instance URL.
    #[must_use]
    pub const fn host(&self) -> &HostUrl {
        &self.host
    }

    /// Returns the user name.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the user password.
    #[must_use]
    pub const fn password(&self) -> &Password {
        &self.password
    }

    /// Returns the OAuth client id, if configured.
    #[must_use]
    pub const fn client_id(&self) -> Option<&ClientId> {
        self.client_id.as_ref()
    }

    /// Returns the OAuth client secret, if configured.
    #[must_use]
    pub const fn client_secret(&self) -> Option<&ClientSecret> {
        self.client_secret.as_ref()
    }

    /// Returns the transport timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns `true` if both OAuth client credentials are configured.
    #[must_use]
    pub const fn uses_oauth(&self) -> bool {
        self.client_id.is_some() && self.client_secret.is_some()
    }
}

/// Builder for [`InstanceConfig`].
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use servicenow_client::{ClientId, ClientSecret, HostUrl, InstanceConfig, Password, Username};
///
/// let config = InstanceConfig::builder()
///     .host(HostUrl::new("https://dev12345.service-now.com").unwrap())
///     .username(Username::new("admin").unwrap())
///     .password(Password::new("secret").unwrap())
///     .client_id(ClientId::new("id").unwrap())
///     .client_secret(ClientSecret::new("client-secret").unwrap())
///     .timeout(Duration::from_secs(30))
///     .user_agent_prefix("ops-sync/2.1")
///     .build()
///     .unwrap();
///
/// assert!(config.uses_oauth());
/// ```
#[derive(Debug, Default)]
pub struct InstanceConfigBuilder {
    host: Option<HostUrl>,
    username: Option<Username>,
    password: Option<Password>,
    client_id: Option<ClientId>,
    client_secret: Option<ClientSecret>,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl InstanceConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the instance URL (required).
    #[must_use]
    pub fn host(mut self, host: HostUrl) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets the user name (required).
    #[must_use]
    pub fn username(mut self, username: Username) -> Self {
        self.username = Some(username);
        self
    }

    /// Sets the user password (required).
    #[must_use]
    pub fn password(mut self, password: Password) -> Self {
        self.password = Some(password);
        self
    }

    /// Sets the OAuth client id.
    #[must_use]
    pub fn client_id(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    /// Sets the OAuth client secret.
    #[must_use]
    pub fn client_secret(mut self, client_secret: ClientSecret) -> Self {
        self.client_secret = Some(client_secret);
        self
    }

    /// Sets the timeout applied to every request, including login.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`InstanceConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `host`, `username`
    /// or `password` are not set.
    pub fn build(self) -> Result<InstanceConfig, ConfigError> {
        let host = self
            .host
            .ok_or(ConfigError::MissingRequiredField { field: "host" })?;
        let username = self
            .username
            .ok_or(ConfigError::MissingRequiredField { field: "username" })?;
        let password = self
            .password
            .ok_or(ConfigError::MissingRequiredField { field: "password" })?;

        Ok(InstanceConfig {
            host,
            username,
            password,
            client_id: self.client_id,
            client_secret: self.client_secret,
            timeout: self.timeout,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic_builder() -> InstanceConfigBuilder {
        InstanceConfig::builder()
            .host(HostUrl::new("https://instance.service-now.com").unwrap())
            .username(Username::new("user").unwrap())
            .password(Password::new("pass").unwrap())
    }

    #[test]
    fn test_builder_requires_host() {
        let result = InstanceConfigBuilder::new()
            .username(Username::new("user").unwrap())
            .password(Password::new("pass").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "host" })
        ));
    }

    #[test]
    fn test_builder_requires_password() {
        let result = InstanceConfigBuilder::new()
            .host(HostUrl::new("https://instance.service-now.com").unwrap())
            .username(Username::new("user").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "password" })
        ));
    }

    #[test]
    fn test_builder_defaults() {
        let config = basic_builder().build().unwrap();

        assert_eq!(config.host().as_ref(), "https://instance.service-now.com");
        assert_eq!(config.username().as_ref(), "user");
        assert_eq!(config.password().as_ref(), "pass");
        assert!(config.client_id().is_none());
        assert!(config.timeout().is_none());
        assert!(config.user_agent_prefix().is_none());
        assert!(!config.uses_oauth());
    }

    #[test]
    fn test_oauth_requires_both_client_credentials() {
        let only_id = basic_builder()
            .client_id(ClientId::new("id").unwrap())
            .build()
            .unwrap();
        assert!(!only_id.uses_oauth());

        let only_secret = basic_builder()
            .client_secret(ClientSecret::new("secret").unwrap())
            .build()
            .unwrap();
        assert!(!only_secret.uses_oauth());

        let both = basic_builder()
            .client_id(ClientId::new("id").unwrap())
            .client_secret(ClientSecret::new("secret").unwrap())
            .build()
            .unwrap();
        assert!(both.uses_oauth());
    }

    #[test]
    fn test_config_debug_hides_password() {
        let config = basic_builder().build().unwrap();
        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("Password(*****)"));
        assert!(!debug_output.contains("\"pass\""));
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<InstanceConfig>();
    }
}
