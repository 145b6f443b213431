use intersig::prelude::{ErrorKind, IntersigError};
use thiserror::Error;

/// Result type for signed api calls
pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Error type for signed api calls
#[derive(Error, Debug)]
pub enum ClientError {
  /// Inherited from IntersigError, raised before anything is sent
  #[error("IntersigError: {0}")]
  IntersigError(#[from] IntersigError),

  /// Failed to build the http request
  #[error("Failed to build http request: {0}")]
  BuildRequestError(#[from] http::Error),

  /// Failed to parse header value
  #[error("Failed to parse header value: {0}")]
  InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),

  /// Failed to stringify header value
  #[error("Failed to stringify header value: {0}")]
  FailedToStrHeader(#[from] http::header::ToStrError),

  /// The url would not carry the request target that was signed
  #[error("Request target mismatch: {0}")]
  RequestTargetMismatch(String),

  /// Signed headers are absent from the request
  #[error("No signature headers found: {0}")]
  NoSignatureHeaders(String),

  /// Http body error
  #[error("Http body error: {0}")]
  HttpBodyError(String),

  /// Transport failure, propagated unmodified
  #[error("Transport error: {0}")]
  TransportError(#[from] TransportError),

  /// Response body is not json
  #[error("Failed to parse response body: {0}")]
  InvalidResponseBody(#[from] serde_json::Error),
}

impl ClientError {
  /// Category of the error
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::IntersigError(e) => e.kind(),
      Self::BuildRequestError(_)
      | Self::InvalidHeaderValue(_)
      | Self::FailedToStrHeader(_)
      | Self::RequestTargetMismatch(_)
      | Self::NoSignatureHeaders(_) => ErrorKind::Validation,
      Self::HttpBodyError(_) | Self::TransportError(_) | Self::InvalidResponseBody(_) => ErrorKind::Transport,
    }
  }
}

/// Error type for transports
#[derive(Error, Debug)]
pub enum TransportError {
  /// Non-2xx response
  #[error("Http status {status}: {body}")]
  Status { status: http::StatusCode, body: String },

  /// Request could not be completed
  #[error("Request failed: {0}")]
  RequestFailed(String),

  #[cfg(feature = "reqwest")]
  /// Error raised by reqwest
  #[error("Reqwest error: {0}")]
  Reqwest(#[from] reqwest::Error),
}
