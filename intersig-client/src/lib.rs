//! # intersig-client
//!
//! `intersig-client` issues signed calls against the REST API. Each call is planned and signed by [`intersig`],
//! turned into an `http::Request` carrying `Accept`, `Host`, `Date`, `Digest` and `Authorization` headers,
//! and handed to a [`Transport`]. The json response body is parsed and returned to the caller.
//!
//! ## Transport
//!
//! [`Transport`] is the only place where network I/O happens. When the `reqwest` feature is enabled
//! (on by default), [`ReqwestTransport`] sends requests with an async `reqwest` client.
//! Retries, timeouts and connection management are left to the transport.
//!
//! ## Verification
//!
//! [`SignedRequest`] extends `http::Request` so that a receiver can re-derive and verify the signature,
//! including the body digest.

mod client;
mod error;
mod http_request;
mod trace;
mod transport;

#[cfg(test)]
mod test_keys;

pub use client::Client;
pub use error::{ClientError, ClientResult, TransportError};
pub use http_request::{build_request, SignedRequest};
pub use intersig::prelude;
pub use transport::Transport;

#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;
