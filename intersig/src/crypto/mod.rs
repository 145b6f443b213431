mod asymmetric;

use crate::error::{IntersigError, IntersigResult};

pub use asymmetric::{PublicKey, SecretKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Algorithm names as they appear in the `algorithm` parameter of the authorization header
pub enum AlgorithmName {
  /// RSASSA-PKCS1-v1_5 over SHA-256
  RsaSha256,
}

impl AlgorithmName {
  pub fn as_str(&self) -> &'static str {
    match self {
      AlgorithmName::RsaSha256 => "rsa-sha256",
    }
  }
}

impl std::fmt::Display for AlgorithmName {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl core::str::FromStr for AlgorithmName {
  type Err = IntersigError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "rsa-sha256" => Ok(Self::RsaSha256),
      _ => Err(IntersigError::InvalidAlgorithmName(s.to_string())),
    }
  }
}

/// SigningKey trait
pub trait SigningKey {
  fn sign(&self, data: &[u8]) -> IntersigResult<Vec<u8>>;
  fn alg(&self) -> AlgorithmName;
}

/// VerifyingKey trait
pub trait VerifyingKey {
  fn verify(&self, data: &[u8], signature: &[u8]) -> IntersigResult<()>;
  fn alg(&self) -> AlgorithmName;
}
