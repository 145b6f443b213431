use crate::{
  authorization::AuthorizationHeader,
  credentials::Credentials,
  crypto::VerifyingKey,
  digest::{verify_digest, DigestAlgorithm, DIGEST_HEADER},
  endpoint::ApiEndpoint,
  error::{IntersigError, IntersigResult},
  planner::PlannedRequest,
  signature_base::{CanonicalHeaders, SignatureBase, REQUEST_TARGET},
  trace::*,
};
use chrono::{DateTime, Utc};
use http::Method;

/// `Date` header format, e.g. `Sun, 18 Oct 2026 12:00:00 GMT`
pub const DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";
/// Value of the `Accept` header sent with every call
pub const ACCEPT_JSON: &str = "application/json";

/// Format a timestamp for the `Date` header
pub fn format_date(date: &DateTime<Utc>) -> String {
  date.format(DATE_FORMAT).to_string()
}

/* ---------------------------------------- */
#[derive(Debug, Clone, PartialEq, Eq)]
/// Headers produced for one signed call. Date and digest are single-use: re-sign on retry.
pub struct SignedHeaders {
  pub date: String,
  pub host: String,
  pub digest: String,
  pub authorization: AuthorizationHeader,
}

impl SignedHeaders {
  /// Header name/value pairs to attach to the outgoing request, in wire order
  pub fn header_pairs(&self) -> Vec<(&'static str, String)> {
    vec![
      ("accept", ACCEPT_JSON.to_string()),
      ("host", self.host.clone()),
      ("date", self.date.clone()),
      (DIGEST_HEADER, self.digest.clone()),
      ("authorization", self.authorization.to_string()),
    ]
  }
}

/* ---------------------------------------- */
#[derive(Debug)]
/// Signs planned requests for one endpoint with one credential snapshot
pub struct RequestSigner<'a> {
  endpoint: &'a ApiEndpoint,
  credentials: &'a Credentials,
  digest_algorithm: DigestAlgorithm,
}

impl<'a> RequestSigner<'a> {
  pub fn new(endpoint: &'a ApiEndpoint, credentials: &'a Credentials) -> Self {
    Self {
      endpoint,
      credentials,
      digest_algorithm: DigestAlgorithm::default(),
    }
  }

  /// Set the body digest algorithm, SHA-256 unless overridden
  pub fn set_digest_algorithm(&mut self, digest_algorithm: DigestAlgorithm) -> &mut Self {
    self.digest_algorithm = digest_algorithm;
    self
  }

  /// Build the signature base covering `(request-target)`, `date`, `host` and `digest` in this order
  pub fn signature_base(&self, planned: &PlannedRequest, date: &str, digest: &str) -> IntersigResult<SignatureBase> {
    let mut headers = CanonicalHeaders::new();
    headers
      .try_insert("date", date)?
      .try_insert("host", self.endpoint.host())?
      .try_insert(DIGEST_HEADER, digest)?;
    let request_target = self.endpoint.request_target(&planned.path_and_query());
    Ok(SignatureBase::new(&planned.method, &request_target, &headers))
  }

  /// Sign the planned request at the given time. Pure function of its inputs.
  pub fn sign(&self, planned: &PlannedRequest, date: DateTime<Utc>) -> IntersigResult<SignedHeaders> {
    let date = format_date(&date);
    let digest = self.digest_algorithm.header_value(&planned.body);
    let signature_base = self.signature_base(planned, &date, &digest)?;

    let secret_key = self.credentials.secret_key()?;
    let authorization = signature_base.build_authorization(self.credentials.key_id(), &secret_key)?;

    Ok(SignedHeaders {
      date,
      host: self.endpoint.host().to_string(),
      digest,
      authorization,
    })
  }
}

/* ---------------------------------------- */
/// Re-derive the signature base of a received request and verify its authorization header.
///
/// `request_target` is the path and query as received, `header_value` looks up a header by lower-cased name.
/// When `digest` is covered it is checked against `body`. Returns the parsed authorization header,
/// e.g., to match its key id.
pub fn verify_signature<F>(
  method: &Method,
  request_target: &str,
  header_value: F,
  body: &[u8],
  authorization: &str,
  verifying_key: &impl VerifyingKey,
) -> IntersigResult<AuthorizationHeader>
where
  F: Fn(&str) -> Option<String>,
{
  let authorization = AuthorizationHeader::try_from(authorization)?;
  let Some((first, covered)) = authorization.headers.split_first() else {
    return Err(IntersigError::InvalidSignature("No covered headers".to_string()));
  };
  if first != REQUEST_TARGET {
    return Err(IntersigError::InvalidSignature(format!(
      "{REQUEST_TARGET} must be the first covered header"
    )));
  }

  let mut headers = CanonicalHeaders::new();
  for name in covered {
    let value =
      header_value(name).ok_or_else(|| IntersigError::InvalidSignature(format!("Missing covered header: {name}")))?;
    headers.try_insert(name, &value)?;
  }
  match headers.get(DIGEST_HEADER) {
    Some(digest) => verify_digest(digest, body)?,
    None => warn!("Digest is not covered by the signature, body is not authenticated"),
  }

  let signature_base = SignatureBase::new(method, request_target, &headers);
  signature_base.verify_authorization(verifying_key, &authorization)?;
  debug!("Verified signature of key id {}", authorization.key_id);
  Ok(authorization)
}
