use url::Url;

/// Errors returned by a [`Connector`](crate::Connector).
///
/// `InvalidArgument` is only produced while constructing a connector. Once a
/// connector exists, the only failure a call can produce is `Transport`.
#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    #[error("invalid argument {uri:?}: {reason}")]
    InvalidArgument { uri: String, reason: String },

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ConnectorError {
    pub(crate) fn invalid(uri: &str, reason: impl Into<String>) -> Self {
        ConnectorError::InvalidArgument {
            uri: uri.to_string(),
            reason: reason.into(),
        }
    }
}

/// The request could not be completed at the network or protocol level.
///
/// A received HTTP response is never a `TransportError`, whatever its status.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request to {url} timed out")]
    Timeout { url: Url },

    #[error("could not connect to {url}: {reason}")]
    Connect { url: Url, reason: String },

    #[error("request canceled")]
    Canceled,

    #[error("transport error: {0}")]
    Other(String),
}

impl TransportError {
    pub(crate) fn from_reqwest(url: &Url, e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout { url: url.clone() }
        } else if e.is_connect() {
            TransportError::Connect {
                url: url.clone(),
                reason: e.to_string(),
            }
        } else {
            TransportError::Other(e.to_string())
        }
    }
}
