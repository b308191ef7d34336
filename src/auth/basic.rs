//! HTTP basic auth encoding.

use base64::{engine::general_purpose::STANDARD, Engine};

/// Encodes `username:password` as a basic auth header value.
pub(crate) fn encode(username: &str, password: &str) -> String {
    let credentials = format!("{username}:{password}");
    format!("Basic {}", STANDARD.encode(credentials))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_is_deterministic() {
        assert_eq!(encode("user", "pass"), encode("user", "pass"));
        assert_eq!(encode("admin", "p@ss:word"), "Basic YWRtaW46cEBzczp3b3Jk");
    }
}
