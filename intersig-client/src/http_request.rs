use crate::{
  error::{ClientError, ClientResult},
  trace::*,
};
use bytes::Bytes;
use http::{header, HeaderMap, Request};
use http_body::Body;
use http_body_util::{BodyExt, Full};
use intersig::prelude::{
  verify_signature, ApiEndpoint, AuthorizationHeader, IntersigError, PlannedRequest, SignedHeaders, VerifyingKey,
};
use std::future::Future;

/// Build the outgoing request for a planned request and the headers signed for it.
/// The planned body bytes are moved into the request body unchanged.
pub fn build_request(
  endpoint: &ApiEndpoint,
  planned: PlannedRequest,
  signed: &SignedHeaders,
) -> ClientResult<Request<Full<Bytes>>> {
  let path_and_query = planned.path_and_query();
  let mut req = Request::builder()
    .method(planned.method)
    .uri(endpoint.url(&path_and_query))
    .header(header::CONTENT_TYPE, "application/json")
    .body(Full::new(Bytes::from(planned.body)))?;

  // the wire target must be exactly what was signed
  let signed_target = endpoint.request_target(&path_and_query);
  let wire_target = req.uri().path_and_query().map(|v| v.as_str()).unwrap_or("/");
  if wire_target != signed_target {
    return Err(ClientError::RequestTargetMismatch(format!(
      "signed `{signed_target}`, sending `{wire_target}`"
    )));
  }
  req.set_signed_headers(signed)?;
  Ok(req)
}

/* --------------------------------------- */
/// A trait about the signed headers of an http request
pub trait SignedRequest {
  /// Attach `Accept`, `Host`, `Date`, `Digest` and `Authorization`, replacing existing values
  fn set_signed_headers(&mut self, signed: &SignedHeaders) -> ClientResult<()>;

  /// Check if the request has an authorization header with the signature scheme
  fn has_signature(&self) -> bool;

  /// Parse the authorization header
  fn authorization(&self) -> ClientResult<AuthorizationHeader>;

  /// Re-derive the signature base from the request as sent and verify it, including the body digest.
  /// If key_id is given, it must match the key id of the authorization header.
  fn verify_signature<T>(
    &self,
    verifying_key: &T,
    key_id: Option<&str>,
  ) -> impl Future<Output = ClientResult<AuthorizationHeader>> + Send
  where
    T: VerifyingKey + Sync;
}

impl<B> SignedRequest for Request<B>
where
  B: Body + Clone + Send + Sync,
  <B as Body>::Data: Send,
  <B as Body>::Error: std::fmt::Display,
{
  fn set_signed_headers(&mut self, signed: &SignedHeaders) -> ClientResult<()> {
    let headers = self.headers_mut();
    for (name, value) in signed.header_pairs() {
      headers.insert(name, value.parse()?);
    }
    Ok(())
  }

  fn has_signature(&self) -> bool {
    authorization_value(self.headers()).is_some()
  }

  fn authorization(&self) -> ClientResult<AuthorizationHeader> {
    let value = authorization_value(self.headers())
      .ok_or_else(|| ClientError::NoSignatureHeaders("The request does not have a signature".to_string()))?;
    Ok(AuthorizationHeader::try_from(value.to_str()?)?)
  }

  async fn verify_signature<T>(&self, verifying_key: &T, key_id: Option<&str>) -> ClientResult<AuthorizationHeader>
  where
    T: VerifyingKey + Sync,
  {
    let authorization = authorization_value(self.headers())
      .ok_or_else(|| ClientError::NoSignatureHeaders("The request does not have a signature".to_string()))?
      .to_str()?;
    let body = self
      .body()
      .clone()
      .collect()
      .await
      .map_err(|e| ClientError::HttpBodyError(e.to_string()))?
      .to_bytes();
    let request_target = self.uri().path_and_query().map(|v| v.as_str()).unwrap_or("/");
    let header_value = |name: &str| {
      self
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
    };

    let verified = verify_signature(
      self.method(),
      request_target,
      header_value,
      &body,
      authorization,
      verifying_key,
    )?;
    if let Some(key_id) = key_id {
      if verified.key_id != key_id {
        error!("Key id mismatch: {} received", verified.key_id);
        return Err(IntersigError::InvalidSignature(format!("Key id mismatch: expected {key_id}")).into());
      }
    }
    Ok(verified)
  }
}

fn authorization_value(headers: &HeaderMap) -> Option<&http::HeaderValue> {
  headers.get(header::AUTHORIZATION).filter(|v| {
    v.to_str()
      .map(|v| v.trim_start().starts_with(intersig::prelude::SIGNATURE_SCHEME))
      .unwrap_or(false)
  })
}
