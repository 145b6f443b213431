use crate::{
  error::IntersigResult,
  request::{ObjectId, QueryParams, RequestBody},
  trace::*,
};
use http::Method;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Left unescaped in query strings: alphanumerics plus URI reserved and mark characters,
/// except `'` and `$` which the API's query parser treats as special, and `#` which would start a fragment.
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
  .remove(b';')
  .remove(b',')
  .remove(b'/')
  .remove(b'?')
  .remove(b':')
  .remove(b'@')
  .remove(b'&')
  .remove(b'=')
  .remove(b'+')
  .remove(b'-')
  .remove(b'_')
  .remove(b'.')
  .remove(b'!')
  .remove(b'~')
  .remove(b'*')
  .remove(b'(')
  .remove(b')');

/// Render query params as `?k1=v1&k2=v2` and percent-encode the whole string.
/// Returns an empty string for empty params.
pub fn encode_query(params: &QueryParams) -> String {
  if params.is_empty() {
    return String::new();
  }
  let raw = params
    .iter()
    .map(|(k, v)| format!("{k}={v}"))
    .collect::<Vec<_>>()
    .join("&");
  utf8_percent_encode(&format!("?{raw}"), QUERY_ENCODE_SET).to_string()
}

/* ---------------------------------------- */
#[derive(Debug, Clone, PartialEq, Eq)]
/// Request resolved for transport, not yet signed
pub struct PlannedRequest {
  /// GET, POST or PATCH
  pub method: Method,
  /// resource path, with the object id appended for updates
  pub path: String,
  /// encoded query string including the leading `?`, or empty
  pub query: String,
  /// serialized body, shared by the digest and the wire
  pub body: Vec<u8>,
}

impl PlannedRequest {
  /// Decide method and path from the presence of a body and an object id:
  /// - body and object id: PATCH `<resource_path>/<object_id>`
  /// - body only: POST `<resource_path>`
  /// - no body: GET `<resource_path><query>`
  pub fn try_new(
    resource_path: &str,
    query: &QueryParams,
    body: &RequestBody,
    object_id: Option<&ObjectId>,
  ) -> IntersigResult<Self> {
    let (method, path, query) = match (body.is_empty(), object_id) {
      (false, Some(object_id)) => (Method::PATCH, format!("{resource_path}/{object_id}"), String::new()),
      (false, None) => (Method::POST, resource_path.to_string(), String::new()),
      (true, object_id) => {
        if object_id.is_some() {
          warn!("Object id is ignored for a request without body");
        }
        (Method::GET, resource_path.to_string(), encode_query(query))
      }
    };
    debug!("Planned {} {}{}", method, path, query);

    Ok(Self {
      method,
      path,
      query,
      body: body.to_bytes()?,
    })
  }

  /// Resource path followed by the encoded query
  pub fn path_and_query(&self) -> String {
    format!("{}{}", self.path, self.query)
  }
}
