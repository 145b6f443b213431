use crate::{
  crypto::AlgorithmName,
  error::{IntersigError, IntersigResult},
  trace::*,
  util::first_duplicate,
};

/// Authorization scheme name
pub const SIGNATURE_SCHEME: &str = "Signature";

/* ---------------------------------------- */
#[derive(Debug, Clone, PartialEq, Eq)]
/// Value of the `Authorization` header carrying the http signature
/// ```text
/// Signature keyId="<id>",algorithm="rsa-sha256",headers="(request-target) date host digest",signature="<base64>"
/// ```
pub struct AuthorizationHeader {
  /// key id the server verifies against
  pub key_id: String,
  /// signature algorithm
  pub algorithm: AlgorithmName,
  /// covered header names, lower-cased, in the order of the signed lines
  pub headers: Vec<String>,
  /// base64 encoded signature
  pub signature: String,
}

impl std::fmt::Display for AuthorizationHeader {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{} keyId=\"{}\",algorithm=\"{}\",headers=\"{}\",signature=\"{}\"",
      SIGNATURE_SCHEME,
      self.key_id,
      self.algorithm,
      self.headers.join(" "),
      self.signature
    )
  }
}

impl TryFrom<&str> for AuthorizationHeader {
  type Error = IntersigError;

  /// Parse the header value produced by `Display`
  fn try_from(value: &str) -> IntersigResult<Self> {
    let Some((scheme, params)) = value.trim().split_once(' ') else {
      return Err(IntersigError::InvalidAuthorizationHeader("Missing scheme".to_string()));
    };
    if !scheme.eq_ignore_ascii_case(SIGNATURE_SCHEME) {
      return Err(IntersigError::InvalidAuthorizationHeader(format!("Unsupported scheme: {scheme}")));
    }
    let params = parse_params(params)?;
    if let Some(dup) = first_duplicate(params.iter().map(|(k, _)| k.as_str())) {
      return Err(IntersigError::InvalidAuthorizationHeader(format!("Duplicate parameter: {dup}")));
    }

    let (mut key_id, mut algorithm, mut headers, mut signature) = (None, None, None, None);
    for (key, value) in params {
      match key.as_str() {
        "keyId" => key_id = Some(value),
        "algorithm" => algorithm = Some(value.parse::<AlgorithmName>()?),
        "headers" => headers = Some(value.split_whitespace().map(|v| v.to_ascii_lowercase()).collect::<Vec<_>>()),
        "signature" => signature = Some(value),
        _ => warn!("Ignore unknown authorization parameter: {}", key),
      }
    }
    let missing = |name: &str| IntersigError::InvalidAuthorizationHeader(format!("Missing parameter: {name}"));
    let headers = headers.ok_or_else(|| missing("headers"))?;
    if let Some(dup) = first_duplicate(headers.iter().map(|h| h.as_str())) {
      return Err(IntersigError::InvalidAuthorizationHeader(format!("Duplicate covered header: {dup}")));
    }

    Ok(Self {
      key_id: key_id.ok_or_else(|| missing("keyId"))?,
      algorithm: algorithm.ok_or_else(|| missing("algorithm"))?,
      headers,
      signature: signature.ok_or_else(|| missing("signature"))?,
    })
  }
}

impl std::str::FromStr for AuthorizationHeader {
  type Err = IntersigError;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::try_from(s)
  }
}

/// Split `k1="v1",k2="v2"` into ordered pairs
fn parse_params(input: &str) -> IntersigResult<Vec<(String, String)>> {
  let invalid = |msg: String| IntersigError::InvalidAuthorizationHeader(msg);
  let mut params = Vec::new();
  let mut rest = input.trim();
  while !rest.is_empty() {
    let (key, after) = rest
      .split_once('=')
      .ok_or_else(|| invalid(format!("Missing `=` in `{rest}`")))?;
    let key = key.trim();
    let after = after
      .strip_prefix('"')
      .ok_or_else(|| invalid(format!("Value of {key} must be quoted")))?;
    let (value, after) = after
      .split_once('"')
      .ok_or_else(|| invalid(format!("Unterminated value of {key}")))?;
    params.push((key.to_string(), value.to_string()));

    rest = after.trim_start();
    if let Some(next) = rest.strip_prefix(',') {
      rest = next.trim_start();
    } else if !rest.is_empty() {
      return Err(invalid(format!("Unexpected trailing input: {rest}")));
    }
  }
  Ok(params)
}
