//! Validated newtype wrappers for instance configuration values.
//!
//! Each wrapper validates its contents on construction. Secret values mask
//! themselves in `Debug` output so they never end up in logs.

use crate::error::ConfigError;
use std::fmt;

/// Generates a non-empty string newtype with a masked `Debug` impl.
macro_rules! secret_newtype {
    ($(#[$meta:meta])* $name:ident, $error:expr) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq)]
        pub struct $name(String);

        impl $name {
            #[doc = concat!("Creates a new validated `", stringify!($name), "`.")]
            ///
            /// # Errors
            ///
            /// Returns an error if the value is empty.
            pub fn new(value: impl Into<String>) -> Result<Self, ConfigError> {
                let value = value.into();
                if value.is_empty() {
                    return Err($error);
                }
                Ok(Self(value))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(concat!(stringify!($name), "(*****)"))
            }
        }
    };
}

/// A validated instance user name.
///
/// # Example
///
/// ```rust
/// use servicenow_client::Username;
///
/// let user = Username::new("admin").unwrap();
/// assert_eq!(user.as_ref(), "admin");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    /// Creates a new validated user name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyUsername`] if the name is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, ConfigError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ConfigError::EmptyUsername);
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

secret_newtype!(
    /// A validated instance user password.
    ///
    /// ```rust
    /// use servicenow_client::Password;
    ///
    /// let password = Password::new("hunter2").unwrap();
    /// assert_eq!(format!("{:?}", password), "Password(*****)");
    /// ```
    Password,
    ConfigError::EmptyPassword
);

secret_newtype!(
    /// A validated OAuth application client id.
    ClientId,
    ConfigError::EmptyClientId
);

secret_newtype!(
    /// A validated OAuth application client secret.
    ClientSecret,
    ConfigError::EmptyClientSecret
);

/// A validated instance URL, such as `https://dev12345.service-now.com`.
///
/// The URL must carry a scheme and a host. Surrounding whitespace and
/// trailing slashes are removed so that paths can be appended directly.
///
/// # Example
///
/// ```rust
/// use servicenow_client::HostUrl;
///
/// let url = HostUrl::new("https://dev12345.service-now.com/").unwrap();
/// assert_eq!(url.as_ref(), "https://dev12345.service-now.com");
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), Some("dev12345.service-now.com"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl HostUrl {
    /// Creates a new validated host URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHostUrl`] if the URL is invalid.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidHostUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidHostUrl { url: url.clone() });
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(ConfigError::InvalidHostUrl { url: url.clone() });
        }

        // Host ends at port, path, query, or end of string
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start {
            return Err(ConfigError::InvalidHostUrl { url: url.clone() });
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> Option<&str> {
        let host = &self.url[self.host_start..self.host_end];
        if host.is_empty() {
            None
        } else {
            Some(host)
        }
    }
}

impl AsRef<str> for HostUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for HostUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
