use crate::error::TransportError;
use bytes::Bytes;
use http::{Request, Response};
use http_body_util::Full;
use std::future::Future;

/* --------------------------------------- */
/// Performs one http round trip. Retries, timeouts and connection management belong to implementors.
/// Non-2xx responses are reported as [`TransportError::Status`].
pub trait Transport {
  fn send(&self, request: Request<Full<Bytes>>) -> impl Future<Output = Result<Response<Bytes>, TransportError>> + Send;
}

/* --------------------------------------- */
#[cfg(feature = "reqwest")]
pub use reqwest_transport::ReqwestTransport;

#[cfg(feature = "reqwest")]
mod reqwest_transport {
  use super::*;
  use crate::trace::*;
  use http_body_util::BodyExt;
  use std::time::Duration;

  #[derive(Debug, Clone, Default)]
  /// [`Transport`] backed by a `reqwest` async client
  pub struct ReqwestTransport {
    client: reqwest::Client,
  }

  impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
      Self { client }
    }

    /// Client with a whole-request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
      let client = reqwest::Client::builder().timeout(timeout).build()?;
      Ok(Self { client })
    }
  }

  impl Transport for ReqwestTransport {
    async fn send(&self, request: Request<Full<Bytes>>) -> Result<Response<Bytes>, TransportError> {
      let (parts, body) = request.into_parts();
      let body = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(never) => match never {},
      };

      debug!("Sending {} {}", parts.method, parts.uri);
      let res = self
        .client
        .request(parts.method, parts.uri.to_string())
        .headers(parts.headers)
        .body(body)
        .send()
        .await?;

      let status = res.status();
      let headers = res.headers().clone();
      let bytes = res.bytes().await?;
      if !status.is_success() {
        return Err(TransportError::Status {
          status,
          body: String::from_utf8_lossy(&bytes).into_owned(),
        });
      }

      let mut response = Response::new(bytes);
      *response.status_mut() = status;
      *response.headers_mut() = headers;
      Ok(response)
    }
  }
}
