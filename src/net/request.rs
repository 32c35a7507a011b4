use http::{HeaderMap, Method};
use url::Url;

/// A single HTTP request as handed to a [`Transport`](crate::net::Transport).
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    /// Absolute URL: the connector's base URI joined with the call's path.
    pub url: Url,
    pub headers: HeaderMap,
    /// Payload sent verbatim. `None` for requests without a body.
    pub body: Option<Vec<u8>>,
}

impl Request {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_body(mut self, body: Option<Vec<u8>>) -> Self {
        self.body = body;
        self
    }
}
