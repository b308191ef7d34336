//! Configuration error types.
//!
//! All configuration constructors return `Result<T, ConfigError>` so invalid
//! instance settings are rejected before a [`Client`](crate::Client) exists.
//!
//! # Example
//!
//! ```rust
//! use servicenow_client::{ConfigError, Username};
//!
//! let result = Username::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyUsername)));
//! ```

use thiserror::Error;

/// Errors that can occur while building an [`InstanceConfig`](crate::InstanceConfig).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Username cannot be empty.
    #[error("Username cannot be empty. Please provide the instance user name.")]
    EmptyUsername,

    /// Password cannot be empty.
    #[error("Password cannot be empty. Please provide the instance user password.")]
    EmptyPassword,

    /// OAuth client id cannot be empty.
    #[error("OAuth client id cannot be empty. Omit it to use basic authentication.")]
    EmptyClientId,

    /// OAuth client secret cannot be empty.
    #[error("OAuth client secret cannot be empty. Omit it to use basic authentication.")]
    EmptyClientSecret,

    /// Host URL is invalid.
    #[error("Invalid host URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://dev12345.service-now.com').")]
    InvalidHostUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_host_url_error_message() {
        let error = ConfigError::InvalidHostUrl {
            url: "not a url".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("not a url"));
        assert!(message.contains("with scheme"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField { field: "password" };
        let message = error.to_string();
        assert!(message.contains("password"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptyUsername;
        let _: &dyn std::error::Error = &error;
    }
}
