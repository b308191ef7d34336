//! Authentication types for the ServiceNow Table API.
//!
//! # Overview
//!
//! - [`AuthHeader`]: The `Authorization` header value sent with every request
//! - [`AuthStrategy`]: How that header is obtained, chosen once per client
//! - [`oauth`]: The OAuth 2.0 password grant against `/oauth_token.do`
//!
//! # Strategy Selection
//!
//! - **OAuth**: used when both a client id and a client secret are configured.
//!   The client exchanges the user credentials for a bearer token the first
//!   time a header is needed.
//! - **Basic**: used otherwise. The header is derived from the user name and
//!   password without any network call.
//!
//! # Example
//!
//! ```rust
//! use servicenow_client::{AuthHeader, Password, Username};
//!
//! let header = AuthHeader::basic(
//!     &Username::new("user").unwrap(),
//!     &Password::new("pass").unwrap(),
//! );
//! assert_eq!(header.value(), "Basic dXNlcjpwYXNz");
//! ```

mod basic;
pub mod oauth;

use std::fmt;

use crate::config::{ClientId, ClientSecret, InstanceConfig, Password, Username};

/// Name of the header carrying the credentials.
pub const AUTHORIZATION: &str = "Authorization";

/// A resolved `Authorization` header value.
///
/// The `Debug` implementation only shows the authentication scheme.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthHeader(String);

impl AuthHeader {
    /// Creates a basic auth header from user credentials.
    #[must_use]
    pub fn basic(username: &Username, password: &Password) -> Self {
        Self(basic::encode(username.as_ref(), password.as_ref()))
    }

    /// Creates a bearer header from an OAuth access token.
    #[must_use]
    pub fn bearer(access_token: &str) -> Self {
        Self(format!("Bearer {access_token}"))
    }

    /// Returns the header name, always `Authorization`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        AUTHORIZATION
    }

    /// Returns the full header value, including the scheme.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scheme = self.0.split_once(' ').map_or("", |(scheme, _)| scheme);
        write!(f, "AuthHeader({scheme} *****)")
    }
}

/// The way a client obtains its [`AuthHeader`].
#[derive(Clone, Debug)]
pub enum AuthStrategy {
    /// HTTP basic auth with the user credentials.
    Basic {
        /// The user name.
        username: Username,
        /// The user password.
        password: Password,
    },
    /// OAuth 2.0 password grant.
    OAuth {
        /// The user name.
        username: Username,
        /// The user password.
        password: Password,
        /// The OAuth application client id.
        client_id: ClientId,
        /// The OAuth application client secret.
        client_secret: ClientSecret,
    },
}

impl AuthStrategy {
    /// Selects the strategy for the given configuration.
    ///
    /// OAuth wins only when both client credentials are present.
    #[must_use]
    pub fn from_config(config: &InstanceConfig) -> Self {
        match (config.client_id(), config.client_secret()) {
            (Some(client_id), Some(client_secret)) => Self::OAuth {
                username: config.username().clone(),
                password: config.password().clone(),
                client_id: client_id.clone(),
                client_secret: client_secret.clone(),
            },
            _ => Self::Basic {
                username: config.username().clone(),
                password: config.password().clone(),
            },
        }
    }

    /// Returns a short name for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Basic { .. } => "basic",
            Self::OAuth { .. } => "oauth",
        }
    }
}
