//! HTTP request types shared by the login flow and the Table API.

use std::collections::HashMap;
use std::fmt;

/// HTTP methods accepted by the Table API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// Retrieve records.
    Get,
    /// Create a record.
    Post,
    /// Replace a record.
    Put,
    /// Update selected fields of a record.
    Patch,
    /// Remove a record.
    Delete,
}

impl HttpMethod {
    pub(crate) fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Patch => write!(f, "PATCH"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// Content type for request bodies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DataType {
    /// JSON payloads for Table API records.
    Json,
    /// Form-encoded payloads for the token endpoint.
    Form,
}

impl DataType {
    /// Returns the MIME type for the content type.
    #[must_use]
    pub const fn as_content_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Form => crate::auth::oauth::FORM_CONTENT_TYPE,
        }
    }
}

/// A fully resolved request handed to the transport.
#[derive(Clone, Debug)]
pub(crate) struct RawRequest {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<String>,
    pub headers: HashMap<String, String>,
}

impl RawRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
            headers: HashMap::new(),
        }
    }

    /// Adds headers in order. Later values replace earlier ones.
    pub fn headers<'a, I>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (name, value) in headers {
            self.headers.insert(name.to_string(), value.to_string());
        }
        self
    }

    /// Sets the body and its `Content-type` header.
    pub fn body(mut self, body: String, data_type: DataType) -> Self {
        self.headers.insert(
            "Content-type".to_string(),
            data_type.as_content_type().to_string(),
        );
        self.body = Some(body);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
        assert_eq!(HttpMethod::Put.to_string(), "PUT");
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_http_method_maps_to_reqwest() {
        assert_eq!(HttpMethod::Patch.as_reqwest(), reqwest::Method::PATCH);
        assert_eq!(HttpMethod::Delete.as_reqwest(), reqwest::Method::DELETE);
    }

    #[test]
    fn test_data_type_content_type() {
        assert_eq!(DataType::Json.as_content_type(), "application/json");
        assert_eq!(
            DataType::Form.as_content_type(),
            "application/x-www-form-urlencoded"
        );
    }

    #[test]
    fn test_later_headers_override_earlier_ones() {
        let request = RawRequest::new(HttpMethod::Get, "https://instance/api/now/x")
            .headers([("Accept", "application/json"), ("Authorization", "Basic a")])
            .headers([("Authorization", "Bearer b")]);

        assert_eq!(request.headers.len(), 2);
        assert_eq!(request.headers["Authorization"], "Bearer b");
    }

    #[test]
    fn test_body_sets_content_type() {
        let request = RawRequest::new(HttpMethod::Post, "https://instance/api/now/x")
            .body("{}".to_string(), DataType::Json);

        assert_eq!(request.body.as_deref(), Some("{}"));
        assert_eq!(request.headers["Content-type"], "application/json");
    }
}
