use thiserror::Error;

/// Result type for request signing
pub type IntersigResult<T> = std::result::Result<T, IntersigError>;

/// Error category a signing failure belongs to.
/// None of them are retried inside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// Credentials are missing, detected before any crypto or network work
  Configuration,
  /// Malformed caller input, detected before any crypto or network work
  Validation,
  /// Key material, digest or signature failures raised by the crypto provider
  Crypto,
  /// Network or http failures reported by the transport. Never produced by this crate.
  Transport,
}

/// Error type for request signing
#[derive(Error, Debug)]
pub enum IntersigError {
  /* ----- Configuration errors ----- */
  /// Public key (key id) has not been set
  #[error("Public key not set")]
  MissingPublicKey,
  /// Private key has not been set
  #[error("Private key not set")]
  MissingPrivateKey,

  /* ----- Validation errors ----- */
  /// Query parameters are not a flat key-value object
  #[error("Invalid query params: {0}")]
  InvalidQueryParams(String),
  /// Body is not a key-value object
  #[error("Invalid body: {0}")]
  InvalidBody(String),
  /// Object id is not exactly 24 bytes
  #[error("Invalid object id: {0}")]
  InvalidObjectId(String),
  /// API endpoint cannot be used as a base url
  #[error("Invalid endpoint: {0}")]
  InvalidEndpoint(String),
  /// Duplicated or malformed header in the canonical header set
  #[error("Invalid canonical header: {0}")]
  InvalidCanonicalHeader(String),
  /// Body serialization failure
  #[error("Failed to serialize body: {0}")]
  SerializeBodyError(#[from] serde_json::Error),

  /* ----- Crypto errors ----- */
  /// Invalid private key for rsa signature
  #[error("Failed to parse private key: {0}")]
  ParsePrivateKeyError(String),
  /// Invalid public key for rsa signature
  #[error("Failed to parse public key: {0}")]
  ParsePublicKeyError(String),
  /// Signature could not be produced
  #[error("Failed to sign: {0}")]
  SignError(String),
  /// Unknown algorithm name
  #[error("Invalid algorithm name: {0}")]
  InvalidAlgorithmName(String),
  /// Unknown digest algorithm name
  #[error("Invalid digest algorithm: {0}")]
  InvalidDigestAlgorithm(String),
  /// Base64 decode error
  #[error("Base64 decode error: {0}")]
  Base64DecodeError(#[from] base64::DecodeError),
  /// Authorization header value cannot be parsed
  #[error("Invalid authorization header: {0}")]
  InvalidAuthorizationHeader(String),
  /// Digest header does not match the body
  #[error("Invalid digest: {0}")]
  InvalidDigest(String),
  /// Signature parse error
  #[error("Failed to parse signature: {0}")]
  ParseSignatureError(String),
  /// Invalid Signature
  #[error("Invalid Signature: {0}")]
  InvalidSignature(String),
}

impl IntersigError {
  /// Returns the category of this error
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::MissingPublicKey | Self::MissingPrivateKey => ErrorKind::Configuration,
      Self::InvalidQueryParams(_)
      | Self::InvalidBody(_)
      | Self::InvalidObjectId(_)
      | Self::InvalidEndpoint(_)
      | Self::InvalidCanonicalHeader(_)
      | Self::SerializeBodyError(_) => ErrorKind::Validation,
      Self::ParsePrivateKeyError(_)
      | Self::ParsePublicKeyError(_)
      | Self::SignError(_)
      | Self::InvalidAlgorithmName(_)
      | Self::InvalidDigestAlgorithm(_)
      | Self::Base64DecodeError(_)
      | Self::InvalidAuthorizationHeader(_)
      | Self::InvalidDigest(_)
      | Self::ParseSignatureError(_)
      | Self::InvalidSignature(_) => ErrorKind::Crypto,
    }
  }
}
