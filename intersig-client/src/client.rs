use crate::{
  error::ClientResult,
  http_request::build_request,
  trace::*,
  transport::Transport,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use http::Request;
use http_body_util::Full;
use intersig::prelude::{
  ApiEndpoint, CredentialStore, Credentials, ObjectId, PlannedRequest, QueryParams, RequestBody, RequestSigner,
};
use serde_json::Value;

#[cfg(feature = "reqwest")]
use crate::transport::ReqwestTransport;

/* --------------------------------------- */
/// Signed api client.
///
/// Every call is planned, signed with a snapshot of the current credentials and handed to the transport.
/// Signatures are single-use: a retried call must go through [`Client::call`] again.
#[derive(Debug)]
pub struct Client<T> {
  endpoint: ApiEndpoint,
  credentials: CredentialStore,
  transport: T,
}

#[cfg(feature = "reqwest")]
impl Client<ReqwestTransport> {
  /// Client for the default endpoint over a default `reqwest` client. Keys must be set before calling.
  pub fn new() -> Self {
    Self::with_transport(ApiEndpoint::default(), ReqwestTransport::default())
  }
}

#[cfg(feature = "reqwest")]
impl Default for Client<ReqwestTransport> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T> Client<T>
where
  T: Transport,
{
  pub fn with_transport(endpoint: ApiEndpoint, transport: T) -> Self {
    Self {
      endpoint,
      credentials: CredentialStore::new(),
      transport,
    }
  }

  /// Client owning a complete credential pair from the start
  pub fn with_credentials(endpoint: ApiEndpoint, credentials: Credentials, transport: T) -> Self {
    Self {
      endpoint,
      credentials: CredentialStore::with_credentials(credentials),
      transport,
    }
  }

  /// Set the key id sent as `keyId`. Only affects calls started afterwards.
  pub fn set_public_key(&self, key: impl Into<String>) {
    self.credentials.set_public_key(key);
  }

  /// Set the PEM encoded RSA private key. Only affects calls started afterwards.
  pub fn set_private_key(&self, key: impl Into<String>) {
    self.credentials.set_private_key(key);
  }

  pub fn endpoint(&self) -> &ApiEndpoint {
    &self.endpoint
  }

  /// Plan and sign a request stamped with the current time, without sending it
  pub fn build_signed_request(
    &self,
    resource_path: &str,
    query: &QueryParams,
    body: &RequestBody,
    object_id: Option<&ObjectId>,
  ) -> ClientResult<Request<Full<Bytes>>> {
    self.build_signed_request_at(resource_path, query, body, object_id, Utc::now())
  }

  /// Plan and sign a request stamped with the given time, without sending it
  pub fn build_signed_request_at(
    &self,
    resource_path: &str,
    query: &QueryParams,
    body: &RequestBody,
    object_id: Option<&ObjectId>,
    date: DateTime<Utc>,
  ) -> ClientResult<Request<Full<Bytes>>> {
    let planned = PlannedRequest::try_new(resource_path, query, body, object_id)?;
    let credentials = self.credentials.snapshot()?;
    let signed = RequestSigner::new(&self.endpoint, &credentials).sign(&planned, date)?;
    build_request(&self.endpoint, planned, &signed)
  }

  /// Issue a signed call and parse the response body as json. An empty response body yields `Value::Null`.
  ///
  /// A non-empty body is sent with POST, or with PATCH on `<resource_path>/<object_id>` when an object id is given.
  /// An empty body is sent as GET with the query parameters.
  pub async fn call(
    &self,
    resource_path: &str,
    query: &QueryParams,
    body: &RequestBody,
    object_id: Option<&ObjectId>,
  ) -> ClientResult<Value> {
    let request = self.build_signed_request(resource_path, query, body, object_id)?;
    debug!("Calling {} {}", request.method(), request.uri());

    let response = self.transport.send(request).await.map_err(|e| {
      error!("Call to {resource_path} failed: {e}");
      e
    })?;
    let bytes = response.into_body();
    if bytes.is_empty() {
      return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(&bytes)?)
  }

  /// Like [`Client::call`], taking untyped json values. Inputs are checked in order: query, body, object id.
  pub async fn call_json(
    &self,
    resource_path: &str,
    query: Value,
    body: Value,
    object_id: Option<&str>,
  ) -> ClientResult<Value> {
    let query = QueryParams::try_from(query)?;
    let body = RequestBody::try_from(body)?;
    let object_id = object_id.map(ObjectId::try_from).transpose()?;
    self.call(resource_path, &query, &body, object_id.as_ref()).await
  }
}
