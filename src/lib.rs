//! Connector layer of a Redfish client.
//!
//! [`Connector`] validates a service base URI once and then issues `GET`,
//! `POST`, `PATCH` and `DELETE` requests relative to it, returning raw
//! [`Response`]s. Requests go through a [`Transport`]; the default one is
//! backed by `reqwest`, and tests or embedders can supply their own.

pub mod config;
pub mod connector;
pub mod errors;
pub mod net;

pub use config::{ConfigError, ConnectorConfig, ConnectorConfigBuilder};
pub use connector::Connector;
pub use errors::{ConnectorError, TransportError};
pub use net::{ReqwestTransport, Request, Response, Transport};
