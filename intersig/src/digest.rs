use crate::error::{IntersigError, IntersigResult};
use base64::{engine::general_purpose, Engine as _};
use sha2::Digest;

/// Digest header name
pub const DIGEST_HEADER: &str = "digest";

/// Body digest algorithm, named as in the `Digest` header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DigestAlgorithm {
  #[default]
  Sha256,
  Sha512,
}

impl DigestAlgorithm {
  pub fn as_str(&self) -> &'static str {
    match self {
      DigestAlgorithm::Sha256 => "SHA-256",
      DigestAlgorithm::Sha512 => "SHA-512",
    }
  }

  /// Returns the raw digest of the given body
  pub fn derive_digest(&self, body_bytes: &[u8]) -> Vec<u8> {
    match self {
      DigestAlgorithm::Sha256 => {
        let mut hasher = sha2::Sha256::new();
        hasher.update(body_bytes);
        hasher.finalize().to_vec()
      }
      DigestAlgorithm::Sha512 => {
        let mut hasher = sha2::Sha512::new();
        hasher.update(body_bytes);
        hasher.finalize().to_vec()
      }
    }
  }

  /// Returns the `Digest` header value, `<alg>=<base64 digest>`
  pub fn header_value(&self, body_bytes: &[u8]) -> String {
    let digest = self.derive_digest(body_bytes);
    format!("{}={}", self.as_str(), general_purpose::STANDARD.encode(digest))
  }
}

impl std::fmt::Display for DigestAlgorithm {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl std::str::FromStr for DigestAlgorithm {
  type Err = IntersigError;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_uppercase().as_str() {
      "SHA-256" => Ok(DigestAlgorithm::Sha256),
      "SHA-512" => Ok(DigestAlgorithm::Sha512),
      _ => Err(IntersigError::InvalidDigestAlgorithm(s.to_string())),
    }
  }
}

/// Verifies a `Digest` header value against the body bytes
pub fn verify_digest(header_value: &str, body_bytes: &[u8]) -> IntersigResult<()> {
  let Some((alg, encoded)) = header_value.split_once('=') else {
    return Err(IntersigError::InvalidDigest(format!("Malformed digest header: {header_value}")));
  };
  let alg: DigestAlgorithm = alg.trim().parse()?;
  let expected = general_purpose::STANDARD.decode(encoded.trim())?;
  if alg.derive_digest(body_bytes) != expected {
    return Err(IntersigError::InvalidDigest(format!("{alg} digest does not match the body")));
  }
  Ok(())
}

/* --------------------------------------- */
