//! Request/response model and the transport seam behind a [`Connector`](crate::Connector).
//!
//! A [`Transport`] takes a fully built [`Request`] and returns a fully
//! buffered [`Response`]. [`ReqwestTransport`] is the implementation used by
//! default; anything else implementing the trait can be injected instead.

mod request;
mod response;
mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use request::Request;
pub use response::Response;
pub use transport::{ReqwestTransport, Transport};
