use futures::future::BoxFuture;

use crate::config::ConnectorConfig;
use crate::errors::TransportError;
use crate::net::{Request, Response};

/// Sends a request and produces a fully buffered response.
///
/// Implementations must be `Send + Sync` and safe for concurrent calls; the
/// connector shares one transport between all of its clones. Any received
/// HTTP response, whatever its status, is an `Ok`.
pub trait Transport: Send + Sync {
    fn send(&self, request: Request) -> BoxFuture<'_, Result<Response, TransportError>>;
}

/// [`Transport`] on top of a single shared `reqwest::Client`.
///
/// Redirects are not followed, so callers always see the response the
/// service actually sent.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &ConnectorConfig) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::none())
            .danger_accept_invalid_certs(!config.verify_tls);

        if let Some(t) = config.timeout {
            builder = builder.timeout(t);
        }
        if let Some(t) = config.connect_timeout {
            builder = builder.connect_timeout(t);
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::Other(format!("cannot build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Wraps an already configured client.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn execute(&self, request: Request) -> Result<Response, TransportError> {
        let Request { method, url, headers, body } = request;

        let mut builder = self.client.request(method, url.clone()).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let res = builder
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(&url, e))?;

        let final_url = res.url().clone();
        let status = res.status().as_u16();
        let headers = res.headers().clone();

        // Fully buffered, no streaming
        let body = res
            .bytes()
            .await
            .map_err(|e| TransportError::from_reqwest(&url, e))?
            .to_vec();

        Ok(Response::new(final_url, status, headers, body))
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: Request) -> BoxFuture<'_, Result<Response, TransportError>> {
        Box::pin(self.execute(request))
    }
}
