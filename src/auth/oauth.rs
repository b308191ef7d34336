//! OAuth 2.0 password grant against a ServiceNow instance.
//!
//! The instance exposes its token endpoint at `<host>/oauth_token.do`. The
//! client posts a form-encoded body with the user credentials and the OAuth
//! application credentials and receives a bearer access token:
//!
//! ```text
//! POST /oauth_token.do
//! Accept: application/json
//! Content-Type: application/x-www-form-urlencoded
//!
//! grant_type=password&username=..&password=..&client_id=..&client_secret=..
//! ```
//!
//! Only the `access_token` field of the reply is used. Refresh tokens and
//! `expires_in` are ignored: a token is used until the instance rejects it.

use serde::Deserialize;

use crate::auth::AuthHeader;
use crate::clients::{ClientError, Response, ServiceNowError, UnexpectedApiResponse};
use crate::config::{ClientId, ClientSecret, HostUrl, Password, Username};

/// Path of the token endpoint, relative to the instance URL.
pub const TOKEN_PATH: &str = "/oauth_token.do";

/// Grant type for user credential exchange.
const PASSWORD_GRANT_TYPE: &str = "password";

/// Content type of the token request body.
pub(crate) const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Form fields of a password grant request.
#[derive(Debug)]
pub(crate) struct PasswordGrantRequest<'a> {
    pub username: &'a Username,
    pub password: &'a Password,
    pub client_id: &'a ClientId,
    pub client_secret: &'a ClientSecret,
}

impl PasswordGrantRequest<'_> {
    /// Encodes the request as an `application/x-www-form-urlencoded` body.
    pub fn to_form(&self) -> String {
        [
            ("grant_type", PASSWORD_GRANT_TYPE),
            ("username", self.username.as_ref()),
            ("password", self.password.as_ref()),
            ("client_id", self.client_id.as_ref()),
            ("client_secret", self.client_secret.as_ref()),
        ]
        .iter()
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
    }
}

#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    access_token: String,
}

/// Returns the token endpoint URL for an instance.
pub(crate) fn token_url(host: &HostUrl) -> String {
    format!("{host}{TOKEN_PATH}")
}

/// Turns a token endpoint response into a bearer header.
///
/// # Errors
///
/// - [`ClientError::UnexpectedResponse`] if the status is not 200
/// - [`ClientError::ServiceNow`] if the body is not JSON or lacks `access_token`
pub(crate) fn bearer_from_response(response: &Response) -> Result<AuthHeader, ClientError> {
    if response.status != 200 {
        return Err(UnexpectedApiResponse::from_response(response).into());
    }

    let token = AccessTokenResponse::deserialize(response.json()?).map_err(|e| {
        ServiceNowError::with_source(
            format!("OAuth token response does not contain an access token: {e}"),
            e,
        )
    })?;

    Ok(AuthHeader::bearer(&token.access_token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_encodes_fields_in_order() {
        let username = Username::new("user").unwrap();
        let password = Password::new("p&ss word").unwrap();
        let client_id = ClientId::new("id").unwrap();
        let client_secret = ClientSecret::new("secret").unwrap();

        let request = PasswordGrantRequest {
            username: &username,
            password: &password,
            client_id: &client_id,
            client_secret: &client_secret,
        };

        assert_eq!(
            request.to_form(),
            "grant_type=password&username=user&password=p%26ss%20word&client_id=id&client_secret=secret"
        );
    }

    #[test]
    fn test_token_url() {
        let host = HostUrl::new("https://instance.service-now.com/").unwrap();
        assert_eq!(
            token_url(&host),
            "https://instance.service-now.com/oauth_token.do"
        );
    }

    #[test]
    fn test_bearer_from_successful_response() {
        let response = Response::new(200, br#"{"access_token": "token", "expires_in": 1799}"#.to_vec());
        let header = bearer_from_response(&response).unwrap();
        assert_eq!(header.value(), "Bearer token");
    }

    #[test]
    fn test_bearer_rejects_unexpected_status() {
        let response = Response::new(403, b"Forbidden".to_vec());
        let error = bearer_from_response(&response).unwrap_err();

        match error {
            ClientError::UnexpectedResponse(e) => {
                assert_eq!(e.status, 403);
                assert!(e.to_string().contains("Forbidden"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_bearer_requires_access_token() {
        let response = Response::new(200, br#"{"token_type": "Bearer"}"#.to_vec());
        let error = bearer_from_response(&response).unwrap_err();

        assert!(matches!(error, ClientError::ServiceNow(_)));
        assert!(error.to_string().contains("access token"));
    }

    #[test]
    fn test_bearer_rejects_invalid_json() {
        let response = Response::new(200, b"<html>".to_vec());
        let error = bearer_from_response(&response).unwrap_err();

        assert!(error.to_string().contains("Received invalid JSON response"));
    }
}
