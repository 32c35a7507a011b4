//! Buffered HTTP response model.
//!
//! This struct represents a **fully buffered** HTTP response as returned by a
//! [`Transport`](crate::net::Transport). It contains the final URL, status code
//! and reason, response headers, and the raw body bytes.
//!
//! ## Notes
//! - The status code is never interpreted: a `404` or `500` is a normal
//!   response. Use [`Response::is_success`] when the caller cares.
//! - `headers` is an `http::HeaderMap`, which is **case-insensitive** for
//!   header names.
//! - Redfish bodies are JSON; parse them with [`Response::json`].
//!
use http::header::LOCATION;
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;

/// Simple structure for HTTP responses.
///
/// All fields reflect the **received** response as-is; no additional parsing
/// or transformation is performed by this type.
#[derive(Debug, Clone)]
pub struct Response {
    /// Final URL of the response.
    pub url: url::Url,

    /// Numeric HTTP status code (e.g., `200`, `404`).
    pub status: u16,

    /// Human-readable reason phrase (e.g., `"OK"`, `"Not Found"`).
    ///
    /// May be `"Unknown"` for non-standard codes.
    pub status_text: String,

    /// Response headers as a case-insensitive map.
    pub headers: HeaderMap,

    /// Raw response body bytes.
    pub body: Vec<u8>,
}

impl Response {
    /// Builds a response with the canonical reason phrase for `status`.
    pub fn new(url: url::Url, status: u16, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            url,
            status,
            status_text: reason_phrase(status),
            headers,
            body,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First value of the named header, if present and valid visible ASCII.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// The `Location` header, which Redfish services set on `201 Created`.
    pub fn location(&self) -> Option<&str> {
        self.headers.get(LOCATION).and_then(|v| v.to_str().ok())
    }

    /// Body as text. Redfish mandates UTF-8; invalid sequences are replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parses the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

fn reason_phrase(status: u16) -> String {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::CONTENT_TYPE;
    use serde::Deserialize;
    use url::Url;

    fn response(status: u16, headers: HeaderMap, body: &[u8]) -> Response {
        let url = Url::parse("https://bmc.example.com/redfish/v1").unwrap();
        Response::new(url, status, headers, body.to_vec())
    }

    #[test]
    fn new_fills_canonical_reason() {
        assert_eq!(response(404, HeaderMap::new(), b"").status_text, "Not Found");
        assert_eq!(response(204, HeaderMap::new(), b"").status_text, "No Content");
        assert_eq!(response(599, HeaderMap::new(), b"").status_text, "Unknown");
    }

    #[test]
    fn success_covers_2xx_only() {
        assert!(response(200, HeaderMap::new(), b"").is_success());
        assert!(response(204, HeaderMap::new(), b"").is_success());
        assert!(!response(301, HeaderMap::new(), b"").is_success());
        assert!(!response(403, HeaderMap::new(), b"").is_success());
    }

    #[test]
    fn location_and_header_lookup_are_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert(LOCATION, "/redfish/v1/SessionService/Sessions/1".parse().unwrap());
        headers.insert("x-auth-token", "abc".parse().unwrap());

        let resp = response(201, headers, b"");
        assert_eq!(resp.location(), Some("/redfish/v1/SessionService/Sessions/1"));
        assert_eq!(resp.header("x-auth-token"), Some("abc"));
        assert_eq!(resp.header("etag"), None);
    }

    #[test]
    fn text_decodes_utf8_body() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, "application/json; charset=\"UTF-8\"".parse().unwrap());

        let resp = response(200, headers, "{\"Name\":\"\u{2603}\"}".as_bytes());
        assert_eq!(resp.text(), "{\"Name\":\"\u{2603}\"}");
    }

    #[test]
    fn text_replaces_invalid_utf8() {
        let resp = response(200, HeaderMap::new(), b"\xff\xfehello");
        assert!(resp.text().contains("hello"));
    }

    #[test]
    fn json_parses_redfish_body() {
        #[derive(Deserialize)]
        struct ServiceRoot {
            #[serde(rename = "RedfishVersion")]
            redfish_version: String,
        }

        let resp = response(200, HeaderMap::new(), br#"{"RedfishVersion":"1.15.0","Id":"RootService"}"#);
        let root: ServiceRoot = resp.json().unwrap();
        assert_eq!(root.redfish_version, "1.15.0");

        let bad = response(200, HeaderMap::new(), b"not json");
        assert!(bad.json::<ServiceRoot>().is_err());
    }
}
