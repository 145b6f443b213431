use crate::{
  authorization::AuthorizationHeader,
  crypto::{SigningKey, VerifyingKey},
  error::{IntersigError, IntersigResult},
  trace::*,
};
use base64::{engine::general_purpose, Engine as _};
use indexmap::IndexMap;

/// Pseudo header covering the method and the request target
pub const REQUEST_TARGET: &str = "(request-target)";

/* ---------------------------------------- */
#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Ordered header name/value pairs covered by the signature.
/// Names are stored lower-cased; insertion order is the order of the signed lines.
pub struct CanonicalHeaders(IndexMap<String, String>);

impl CanonicalHeaders {
  pub fn new() -> Self {
    Self::default()
  }

  /// Append a header. A name can only be covered once.
  pub fn try_insert(&mut self, name: &str, value: &str) -> IntersigResult<&mut Self> {
    let name = name.trim().to_ascii_lowercase();
    if name.is_empty() || name == REQUEST_TARGET {
      return Err(IntersigError::InvalidCanonicalHeader(format!("Reserved or empty header name: {name}")));
    }
    if value.contains('\n') {
      return Err(IntersigError::InvalidCanonicalHeader(format!("Header value of {name} spans lines")));
    }
    if self.0.contains_key(&name) {
      return Err(IntersigError::InvalidCanonicalHeader(format!("Duplicate header: {name}")));
    }
    self.0.insert(name, value.to_string());
    Ok(self)
  }

  pub fn get(&self, name: &str) -> Option<&str> {
    self.0.get(&name.to_ascii_lowercase()).map(|v| v.as_str())
  }

  /// Header names in signing order
  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.0.keys().map(|k| k.as_str())
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

/* ---------------------------------------- */
/// Signature base, i.e., the exact string signed with the private key:
///
/// ```text
/// (request-target): <method> <path><query>
/// <header1>: <value1>
/// <headerN>: <valueN>
/// ```
#[derive(Debug, Clone)]
pub struct SignatureBase {
  /// lower-cased `<method> <target>`
  request_target: String,
  /// covered headers in signing order
  headers: CanonicalHeaders,
}

impl SignatureBase {
  /// Creates the signature base from the method, the full request target (base path, resource path and encoded query)
  /// and the ordered covered headers
  pub fn new(method: &http::Method, request_target: &str, headers: &CanonicalHeaders) -> Self {
    let request_target = format!("{} {}", method.as_str(), request_target).to_lowercase();
    Self {
      request_target,
      headers: headers.clone(),
    }
  }

  /// Header list declared in the authorization header, in the order of the signed lines
  pub fn covered_headers(&self) -> Vec<String> {
    std::iter::once(REQUEST_TARGET)
      .chain(self.headers.names())
      .map(|v| v.to_string())
      .collect()
  }

  /// Returns the signature base string as bytes to be signed
  pub fn as_bytes(&self) -> Vec<u8> {
    self.to_string().into_bytes()
  }

  /// Sign the signature base and assemble the authorization header
  pub fn build_authorization(&self, key_id: &str, signing_key: &impl SigningKey) -> IntersigResult<AuthorizationHeader> {
    debug!("Signing request target `{}` over {:?}", self.request_target, self.covered_headers());
    let signature = signing_key.sign(&self.as_bytes())?;
    Ok(AuthorizationHeader {
      key_id: key_id.to_string(),
      algorithm: signing_key.alg(),
      headers: self.covered_headers(),
      signature: general_purpose::STANDARD.encode(signature),
    })
  }

  /// Verify the signature carried in the authorization header against this signature base
  pub fn verify_authorization(
    &self,
    verifying_key: &impl VerifyingKey,
    authorization: &AuthorizationHeader,
  ) -> IntersigResult<()> {
    if authorization.algorithm != verifying_key.alg() {
      return Err(IntersigError::InvalidSignature(format!(
        "Algorithm mismatch: {} declared, {} expected",
        authorization.algorithm,
        verifying_key.alg()
      )));
    }
    if authorization.headers != self.covered_headers() {
      return Err(IntersigError::InvalidSignature(
        "Declared headers differ from the signed lines".to_string(),
      ));
    }
    let signature = general_purpose::STANDARD.decode(&authorization.signature)?;
    verifying_key.verify(&self.as_bytes(), &signature)
  }
}

impl std::fmt::Display for SignatureBase {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}: {}", REQUEST_TARGET, self.request_target)?;
    for (name, value) in self.headers.iter() {
      write!(f, "\n{name}: {value}")?;
    }
    Ok(())
  }
}
