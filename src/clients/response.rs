//! Raw Table API responses with lazy JSON decoding.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::clients::ServiceNowError;

/// A response from the instance.
///
/// The body is kept as raw bytes. [`json`](Self::json) decodes it on first
/// access and returns the same cached value afterwards.
///
/// # Example
///
/// ```rust
/// use servicenow_client::Response;
///
/// let response = Response::with_headers(
///     200,
///     br#"{"result": {"number": "INC0010001"}}"#.to_vec(),
///     [("Content-Type", "application/json")],
/// );
///
/// assert_eq!(response.headers["Content-Type"], "application/json");
/// assert_eq!(response.json().unwrap()["result"]["number"], "INC0010001");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// The raw response body.
    pub data: Vec<u8>,
    /// Response headers. Later duplicates overwrite earlier ones.
    pub headers: HashMap<String, String>,
    json: OnceLock<serde_json::Value>,
}

impl Response {
    /// Creates a response without headers.
    #[must_use]
    pub fn new(status: u16, data: Vec<u8>) -> Self {
        Self {
            status,
            data,
            ..Self::default()
        }
    }

    /// Creates a response from an ordered list of header pairs.
    #[must_use]
    pub fn with_headers<I, K, V>(status: u16, data: Vec<u8>, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            status,
            data,
            headers: headers
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
            ..Self::default()
        }
    }

    /// Returns the decoded JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceNowError`] if the body is not valid JSON. Failures
    /// are not cached.
    pub fn json(&self) -> Result<&serde_json::Value, ServiceNowError> {
        if let Some(value) = self.json.get() {
            return Ok(value);
        }

        let value: serde_json::Value = serde_json::from_slice(&self.data).map_err(|e| {
            tracing::debug!("Failed to decode response body: {e}");
            ServiceNowError::with_source(
                format!("Received invalid JSON response: {}", self.text()),
                e,
            )
        })?;

        Ok(self.json.get_or_init(|| value))
    }

    /// Returns the body as text, replacing invalid UTF-8 sequences.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }
}
