//! The connector: a validated base URI plus a transport.
//!
//! A [`Connector`] is the lowest layer of the Redfish client. It owns the
//! service's base URI, turns a verb, a path and an optional body into a
//! [`Request`], and hands back whatever [`Response`] the service sent. It does
//! not interpret status codes, retry, or follow redirects.
//!
//! ```rust,no_run
//! use redfish_client::Connector;
//! # async fn run() -> Result<(), redfish_client::ConnectorError> {
//! let connector = Connector::new("https://bmc.example.com")?;
//!
//! let root = connector.get("/redfish/v1").await?;
//! if root.status == 404 {
//!     // not a Redfish service
//! }
//! # Ok(()) }
//! ```
use std::fmt;
use std::sync::Arc;

use http::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use http::Method;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::config::ConnectorConfig;
use crate::errors::{ConnectorError, TransportError};
use crate::net::{ReqwestTransport, Request, Response, Transport};

/// HTTP verbs against a fixed Redfish service root.
///
/// The base URI and headers are fixed at construction. Cloning is cheap and
/// clones share the same transport, so a connector can be handed to as many
/// tasks as needed.
#[derive(Clone)]
pub struct Connector {
    base_uri: Url,
    headers: HeaderMap,
    transport: Arc<dyn Transport>,
}

impl Connector {
    /// Creates a connector for `uri` with the default configuration.
    ///
    /// Fails with [`ConnectorError::InvalidArgument`] when `uri` is empty,
    /// not an absolute URI, has no host, or is not `http`/`https`.
    /// No network I/O happens here.
    pub fn new(uri: &str) -> Result<Self, ConnectorError> {
        Self::with_config(uri, ConnectorConfig::default())
    }

    /// Creates a connector for `uri` that talks through a [`ReqwestTransport`] built from `config`.
    pub fn with_config(uri: &str, config: ConnectorConfig) -> Result<Self, ConnectorError> {
        let base_uri = parse_base_uri(uri)?;
        let transport = ReqwestTransport::new(&config)?;
        Self::assemble(uri, base_uri, &config, Arc::new(transport))
    }

    /// Creates a connector for `uri` that sends every request through `transport`.
    ///
    /// Only the headers and user agent of `config` are used. `timeout`,
    /// `connect_timeout` and `verify_tls` belong to the transport and are ignored here.
    pub fn with_transport(
        uri: &str,
        config: ConnectorConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ConnectorError> {
        let base_uri = parse_base_uri(uri)?;
        Self::assemble(uri, base_uri, &config, transport)
    }

    fn assemble(
        uri: &str,
        base_uri: Url,
        config: &ConnectorConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ConnectorError> {
        let mut headers = config
            .header_map()
            .map_err(|e| ConnectorError::invalid(uri, e.to_string()))?;
        // an explicit User-Agent entry in `config.headers` wins
        if !headers.contains_key(USER_AGENT) {
            let ua = HeaderValue::from_str(&config.user_agent)
                .map_err(|_| ConnectorError::invalid(uri, format!("invalid user agent {:?}", config.user_agent)))?;
            headers.insert(USER_AGENT, ua);
        }

        log::debug!("connector created for {base_uri}");

        Ok(Self {
            base_uri,
            headers,
            transport,
        })
    }

    pub fn base_uri(&self) -> &Url {
        &self.base_uri
    }

    /// Headers sent with every request. `Content-Type` is left out of requests without a body.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub async fn get(&self, path: &str) -> Result<Response, ConnectorError> {
        self.request(Method::GET, path, None).await
    }

    /// Sends `body` verbatim. An empty body is allowed.
    pub async fn post(&self, path: &str, body: impl Into<Vec<u8>>) -> Result<Response, ConnectorError> {
        self.request(Method::POST, path, Some(body.into())).await
    }

    pub async fn patch(&self, path: &str, body: impl Into<Vec<u8>>) -> Result<Response, ConnectorError> {
        self.request(Method::PATCH, path, Some(body.into())).await
    }

    pub async fn delete(&self, path: &str) -> Result<Response, ConnectorError> {
        self.request(Method::DELETE, path, None).await
    }

    /// Sends a request for `path` and returns the response as received.
    ///
    /// Only a transport failure is an error; any status code is returned as `Ok`.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Response, ConnectorError> {
        let url = self.url_for(path);
        log::debug!("{method} {url}");

        let mut headers = self.headers.clone();
        if body.is_none() {
            headers.remove(CONTENT_TYPE);
        }

        let request = Request::new(method.clone(), url.clone())
            .with_headers(headers)
            .with_body(body);

        match self.transport.send(request).await {
            Ok(resp) => {
                log::trace!("{method} {url} -> {} {}", resp.status, resp.status_text);
                Ok(resp)
            }
            Err(e) => {
                log::warn!("{method} {url} failed: {e}");
                Err(e.into())
            }
        }
    }

    /// Like [`request`](Self::request), but gives up with [`TransportError::Canceled`]
    /// as soon as `cancel` fires.
    pub async fn request_with_cancel(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
        cancel: CancellationToken,
    ) -> Result<Response, ConnectorError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                log::debug!("{method} {path} canceled");
                Err(TransportError::Canceled.into())
            }
            r = self.request(method.clone(), path, body) => r,
        }
    }

    /// Base URI with its path and query replaced by `path`.
    ///
    /// A `#fragment` is dropped since it is never sent on the wire. Dot segments
    /// are resolved the way any URL parser resolves them.
    fn url_for(&self, path: &str) -> Url {
        let path = path.split_once('#').map_or(path, |(p, _)| p);
        let (path, query) = match path.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (path, None),
        };

        let mut url = self.base_uri.clone();
        if path.starts_with('/') {
            url.set_path(path);
        } else {
            url.set_path(&format!("/{path}"));
        }
        url.set_query(query);
        url.set_fragment(None);
        url
    }
}

impl fmt::Debug for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connector")
            .field("base_uri", &self.base_uri.as_str())
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

fn parse_base_uri(uri: &str) -> Result<Url, ConnectorError> {
    if uri.trim().is_empty() {
        return Err(ConnectorError::invalid(uri, "URI is empty"));
    }

    let url = Url::parse(uri).map_err(|e| ConnectorError::invalid(uri, e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConnectorError::invalid(uri, format!("unsupported scheme {:?}", url.scheme())));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(ConnectorError::invalid(uri, "URI has no host"));
    }

    Ok(url)
}
