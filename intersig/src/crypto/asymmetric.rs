use super::AlgorithmName;
use crate::{
  error::{IntersigError, IntersigResult},
  trace::*,
};
use pkcs8::Document;
use rsa::{
  pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey},
  pkcs1v15,
  pkcs8::{DecodePrivateKey, DecodePublicKey},
  signature::{SignatureEncoding, Signer, Verifier},
  RsaPrivateKey, RsaPublicKey,
};
use sha2::Sha256;

/// PEM labels accepted for key material
mod pem_labels {
  pub const PKCS8_PRIVATE_KEY: &str = "PRIVATE KEY";
  pub const PKCS1_PRIVATE_KEY: &str = "RSA PRIVATE KEY";
  pub const SPKI_PUBLIC_KEY: &str = "PUBLIC KEY";
  pub const PKCS1_PUBLIC_KEY: &str = "RSA PUBLIC KEY";
}

/* -------------------------------- */
/// Secret key for http signature
#[derive(Clone)]
pub enum SecretKey {
  /// rsa-sha256
  RsaSha256(RsaPrivateKey),
}

impl SecretKey {
  /// Derive secret key from pem string, either PKCS#8 or PKCS#1 encoded
  pub fn from_pem(pem: &str) -> IntersigResult<Self> {
    let (tag, doc) = Document::from_pem(pem).map_err(|e| IntersigError::ParsePrivateKeyError(e.to_string()))?;
    let sk = match tag {
      pem_labels::PKCS8_PRIVATE_KEY => {
        debug!("Read PKCS#8 RSA private key");
        RsaPrivateKey::from_pkcs8_der(doc.as_bytes()).map_err(|e| IntersigError::ParsePrivateKeyError(e.to_string()))?
      }
      pem_labels::PKCS1_PRIVATE_KEY => {
        debug!("Read PKCS#1 RSA private key");
        RsaPrivateKey::from_pkcs1_der(doc.as_bytes()).map_err(|e| IntersigError::ParsePrivateKeyError(e.to_string()))?
      }
      _ => return Err(IntersigError::ParsePrivateKeyError(format!("Invalid tag: {tag}"))),
    };
    Ok(Self::RsaSha256(sk))
  }

  /// Get public key from secret key
  pub fn public_key(&self) -> PublicKey {
    match &self {
      Self::RsaSha256(sk) => PublicKey::RsaSha256(sk.to_public_key()),
    }
  }
}

impl std::fmt::Debug for SecretKey {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::RsaSha256(_) => f.write_str("SecretKey::RsaSha256(..)"),
    }
  }
}

impl super::SigningKey for SecretKey {
  /// Sign data with PKCS#1 v1.5 padding
  fn sign(&self, data: &[u8]) -> IntersigResult<Vec<u8>> {
    match &self {
      Self::RsaSha256(sk) => {
        let sk = pkcs1v15::SigningKey::<Sha256>::new(sk.clone());
        let sig = sk.try_sign(data).map_err(|e| IntersigError::SignError(e.to_string()))?;
        Ok(sig.to_vec())
      }
    }
  }

  fn alg(&self) -> AlgorithmName {
    match self {
      Self::RsaSha256(_) => AlgorithmName::RsaSha256,
    }
  }
}

/* -------------------------------- */
/// Public key for http signature
#[derive(Debug, Clone)]
pub enum PublicKey {
  /// rsa-sha256
  RsaSha256(RsaPublicKey),
}

impl PublicKey {
  /// Convert from pem string, either SubjectPublicKeyInfo or PKCS#1 encoded
  pub fn from_pem(pem: &str) -> IntersigResult<Self> {
    let (tag, doc) = Document::from_pem(pem).map_err(|e| IntersigError::ParsePublicKeyError(e.to_string()))?;
    let pk = match tag {
      pem_labels::SPKI_PUBLIC_KEY => {
        RsaPublicKey::from_public_key_der(doc.as_bytes()).map_err(|e| IntersigError::ParsePublicKeyError(e.to_string()))?
      }
      pem_labels::PKCS1_PUBLIC_KEY => {
        RsaPublicKey::from_pkcs1_der(doc.as_bytes()).map_err(|e| IntersigError::ParsePublicKeyError(e.to_string()))?
      }
      _ => return Err(IntersigError::ParsePublicKeyError(format!("Invalid tag: {tag}"))),
    };
    Ok(Self::RsaSha256(pk))
  }
}

impl super::VerifyingKey for PublicKey {
  /// Verify signature
  fn verify(&self, data: &[u8], signature: &[u8]) -> IntersigResult<()> {
    match self {
      Self::RsaSha256(pk) => {
        let signature =
          pkcs1v15::Signature::try_from(signature).map_err(|e| IntersigError::ParseSignatureError(e.to_string()))?;
        let vk = pkcs1v15::VerifyingKey::<Sha256>::new(pk.clone());
        vk.verify(data, &signature)
          .map_err(|e| IntersigError::InvalidSignature(e.to_string()))
      }
    }
  }

  /// Get the algorithm name
  fn alg(&self) -> AlgorithmName {
    match self {
      Self::RsaSha256(_) => AlgorithmName::RsaSha256,
    }
  }
}
